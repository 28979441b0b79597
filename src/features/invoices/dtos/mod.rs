mod invoice_dto;

pub use invoice_dto::{
    InvoiceListQuery, InvoicePdfResponseDto, InvoiceResponseDto, InvoiceSettingsDto,
    UpdateInvoiceSettingsDto, UpdateInvoiceStatusDto,
};
