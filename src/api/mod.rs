pub mod diagram_dto;
