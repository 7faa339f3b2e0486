pub mod a001_document_type;
pub mod a002_approver;
pub mod a003_approval_group;
pub mod a004_circuit;
pub mod a005_vendor;
pub mod a006_customer;
pub mod a007_status;
