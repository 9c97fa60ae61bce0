use super::{id::OrderId, money::Money};

/// Snapshot of an order as the order system reported it. Only lives for
/// the duration of one request.
#[derive(Debug, Clone)]
pub struct Order {
    id: OrderId,
    number: Option<String>,
    user_email: Option<String>,
    total: Money,
    lines: Vec<OrderLine>,
}

#[derive(Debug, Clone)]
pub struct OrderLine {
    pub product_name: String,
    pub quantity: u32,
    pub unit_price: Money,
}

impl Order {
    pub fn new(id: OrderId, total: Money) -> Self {
        Self {
            id,
            number: None,
            user_email: None,
            total,
            lines: Vec::new(),
        }
    }

    pub fn with_number(mut self, number: impl Into<String>) -> Self {
        self.number = Some(number.into());
        self
    }

    pub fn with_user_email(mut self, email: impl Into<String>) -> Self {
        self.user_email = Some(email.into());
        self
    }

    pub fn with_lines(mut self, lines: Vec<OrderLine>) -> Self {
        self.lines = lines;
        self
    }

    pub fn id(&self) -> &OrderId {
        &self.id
    }

    pub fn number(&self) -> Option<&str> {
        self.number.as_deref()
    }

    pub fn user_email(&self) -> Option<&str> {
        self.user_email.as_deref()
    }

    pub fn total(&self) -> &Money {
        &self.total
    }

    pub fn lines(&self) -> &[OrderLine] {
        &self.lines
    }

    /// Shopper-facing label, falling back to the raw id when the order
    /// system did not report a number.
    pub fn description(&self) -> String {
        match &self.number {
            Some(number) => format!("Order #{number}"),
            None => format!("Order {}", self.id),
        }
    }
}
