pub mod adyen;
pub mod api_errors;
pub mod mollie;
pub mod pay;
pub mod saleor;
