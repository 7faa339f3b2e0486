//! Черновик мастера маршрута: чистое состояние шагов без сигналов.
//!
//! Порядковые номера этапов не редактируются руками — они назначаются
//! по позиции в списке при сборке DTO, поэтому нарушить непрерывность
//! нумерации из UI невозможно.

use contracts::domain::a004_circuit::aggregate::{Circuit, CircuitDto, CircuitStage};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardStep {
    /// Шапка: код, название, вид документа
    General,
    /// Состав и порядок этапов
    Stages,
    /// Итоговый просмотр перед сохранением
    Review,
}

impl WizardStep {
    pub fn title(&self) -> &'static str {
        match self {
            WizardStep::General => "Основное",
            WizardStep::Stages => "Этапы",
            WizardStep::Review => "Проверка",
        }
    }

    pub fn next(&self) -> Option<WizardStep> {
        match self {
            WizardStep::General => Some(WizardStep::Stages),
            WizardStep::Stages => Some(WizardStep::Review),
            WizardStep::Review => None,
        }
    }

    pub fn prev(&self) -> Option<WizardStep> {
        match self {
            WizardStep::General => None,
            WizardStep::Stages => Some(WizardStep::General),
            WizardStep::Review => Some(WizardStep::Stages),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StageDraft {
    pub name: String,
    pub group_id: String,
    /// 0 = требуются одобрения всех участников группы
    pub quorum: u32,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CircuitDraft {
    pub code: String,
    pub description: String,
    pub comment: String,
    pub document_type_id: String,
    pub is_active: bool,
    pub stages: Vec<StageDraft>,
}

impl CircuitDraft {
    pub fn new() -> Self {
        Self {
            is_active: true,
            ..Default::default()
        }
    }

    pub fn from_circuit(circuit: &Circuit) -> Self {
        Self {
            code: circuit.base.code.clone(),
            description: circuit.base.description.clone(),
            comment: circuit.base.comment.clone().unwrap_or_default(),
            document_type_id: circuit.document_type_id.clone(),
            is_active: circuit.is_active,
            stages: circuit
                .stages
                .iter()
                .map(|s| StageDraft {
                    name: s.name.clone(),
                    group_id: s.group_id.clone(),
                    quorum: s.quorum,
                })
                .collect(),
        }
    }

    /// Валидация шага "Основное"
    pub fn validate_general(&self) -> Result<(), String> {
        if self.description.trim().is_empty() {
            return Err("Название маршрута не может быть пустым".into());
        }
        if self.document_type_id.trim().is_empty() {
            return Err("Не указан вид документа".into());
        }
        Ok(())
    }

    /// Валидация шага "Этапы"
    pub fn validate_stages(&self) -> Result<(), String> {
        if self.stages.is_empty() {
            return Err("Маршрут должен содержать хотя бы один этап".into());
        }
        for (i, stage) in self.stages.iter().enumerate() {
            if stage.name.trim().is_empty() {
                return Err(format!("Этап {}: не задано название", i + 1));
            }
            if stage.group_id.trim().is_empty() {
                return Err(format!("Этап {}: не выбрана группа согласования", i + 1));
            }
        }
        Ok(())
    }

    /// Валидация, применимая к шагу (Review проверяет всё)
    pub fn validate_step(&self, step: WizardStep) -> Result<(), String> {
        match step {
            WizardStep::General => self.validate_general(),
            WizardStep::Stages => self.validate_stages(),
            WizardStep::Review => {
                self.validate_general()?;
                self.validate_stages()
            }
        }
    }

    pub fn add_stage(&mut self) {
        self.stages.push(StageDraft::default());
    }

    pub fn remove_stage(&mut self, index: usize) {
        if index < self.stages.len() {
            self.stages.remove(index);
        }
    }

    pub fn move_stage_up(&mut self, index: usize) {
        if index > 0 && index < self.stages.len() {
            self.stages.swap(index - 1, index);
        }
    }

    pub fn move_stage_down(&mut self, index: usize) {
        if index + 1 < self.stages.len() {
            self.stages.swap(index, index + 1);
        }
    }

    /// Собрать DTO; порядковые номера этапов назначаются по позиции
    pub fn to_dto(&self, id: Option<String>) -> CircuitDto {
        CircuitDto {
            id,
            code: Some(self.code.clone()),
            description: self.description.clone(),
            document_type_id: self.document_type_id.clone(),
            stages: self
                .stages
                .iter()
                .enumerate()
                .map(|(i, s)| CircuitStage {
                    order: (i + 1) as u32,
                    name: s.name.clone(),
                    group_id: s.group_id.clone(),
                    quorum: s.quorum,
                })
                .collect(),
            is_active: self.is_active,
            comment: if self.comment.trim().is_empty() {
                None
            } else {
                Some(self.comment.clone())
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft_with_stages(names: &[&str]) -> CircuitDraft {
        let mut draft = CircuitDraft::new();
        draft.description = "Договоры".into();
        draft.document_type_id = "dt1".into();
        for name in names {
            draft.stages.push(StageDraft {
                name: name.to_string(),
                group_id: "g1".into(),
                quorum: 0,
            });
        }
        draft
    }

    #[test]
    fn general_step_requires_document_type() {
        let mut draft = CircuitDraft::new();
        draft.description = "Договоры".into();
        assert!(draft.validate_general().is_err());
        draft.document_type_id = "dt1".into();
        assert!(draft.validate_general().is_ok());
    }

    #[test]
    fn stages_step_rejects_empty_list_and_unnamed_stage() {
        let mut draft = draft_with_stages(&[]);
        assert!(draft.validate_stages().is_err());

        draft.add_stage();
        assert!(draft.validate_stages().is_err());

        draft.stages[0].name = "Юристы".into();
        assert!(draft.validate_stages().is_err());

        draft.stages[0].group_id = "g1".into();
        assert!(draft.validate_stages().is_ok());
    }

    #[test]
    fn to_dto_numbers_stages_by_position() {
        let draft = draft_with_stages(&["Юристы", "Финконтроль", "Директор"]);
        let dto = draft.to_dto(None);
        let orders: Vec<u32> = dto.stages.iter().map(|s| s.order).collect();
        assert_eq!(orders, vec![1, 2, 3]);
    }

    #[test]
    fn reorder_then_to_dto_keeps_contiguous_numbering() {
        let mut draft = draft_with_stages(&["Юристы", "Финконтроль", "Директор"]);
        draft.move_stage_up(2);
        draft.move_stage_down(0);

        let dto = draft.to_dto(None);
        let names: Vec<&str> = dto.stages.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Директор", "Юристы", "Финконтроль"]);
        let orders: Vec<u32> = dto.stages.iter().map(|s| s.order).collect();
        assert_eq!(orders, vec![1, 2, 3]);
    }

    #[test]
    fn review_step_validates_everything() {
        let mut draft = draft_with_stages(&["Юристы"]);
        assert!(draft.validate_step(WizardStep::Review).is_ok());
        draft.document_type_id.clear();
        assert!(draft.validate_step(WizardStep::Review).is_err());
    }

    #[test]
    fn step_navigation_is_linear() {
        assert_eq!(WizardStep::General.next(), Some(WizardStep::Stages));
        assert_eq!(WizardStep::Stages.next(), Some(WizardStep::Review));
        assert_eq!(WizardStep::Review.next(), None);
        assert_eq!(WizardStep::General.prev(), None);
    }
}
