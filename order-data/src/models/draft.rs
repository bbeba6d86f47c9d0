use tracing::{debug, info};
use uuid::Uuid;

use crate::models::errors::{DraftError, LineIssue};
use crate::models::order::{CreateOrderRequest, NewOrderItem};
use crate::models::product::Product;

/// Stable handle for one line of a draft, independent of its position.
pub type LineId = Uuid;

/// An order being composed: one customer plus a list of product lines.
///
/// The draft is the single source of truth for the composition flow;
/// whatever surface renders it is a projection of this value. A draft
/// always holds at least one line, and submission is gated by
/// [`build_request`](Self::build_request) so that an invalid draft can
/// never reach the network.
#[derive(Debug, Clone, PartialEq)]
pub struct DraftOrder {
    customer_id: Option<String>,
    lines: Vec<DraftLine>,
}

/// One line of a draft. The bound product is a snapshot captured when
/// the product was selected; its price and stock are not refreshed
/// afterward, so validation reflects the catalog as of selection time.
#[derive(Debug, Clone, PartialEq)]
pub struct DraftLine {
    id: LineId,
    product: Option<Product>,
    quantity: u32,
}

impl DraftLine {
    fn empty() -> Self {
        Self {
            id: Uuid::new_v4(),
            product: None,
            quantity: 1,
        }
    }

    pub fn id(&self) -> LineId {
        self.id
    }

    pub fn product(&self) -> Option<&Product> {
        self.product.as_ref()
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Line contribution to the order total. A line without a product
    /// contributes nothing.
    pub fn subtotal(&self) -> f64 {
        match &self.product {
            Some(product) => f64::from(self.quantity) * product.price,
            None => 0.0,
        }
    }

    /// Quantity must be positive and, once a product is bound, within
    /// the snapshotted stock. A line without a product only has its
    /// quantity checked; the missing product is reported at submission.
    pub fn validate(&self) -> Result<(), LineIssue> {
        if self.quantity == 0 {
            return Err(LineIssue::QuantityZero);
        }
        if let Some(product) = &self.product {
            if self.quantity > product.stock_quantity {
                return Err(LineIssue::InsufficientStock {
                    requested: self.quantity,
                    stock: product.stock_quantity,
                });
            }
        }
        Ok(())
    }
}

impl DraftOrder {
    /// A fresh draft: no customer, one empty line with quantity 1.
    pub fn new() -> Self {
        Self {
            customer_id: None,
            lines: vec![DraftLine::empty()],
        }
    }

    pub fn customer_id(&self) -> Option<&str> {
        self.customer_id.as_deref()
    }

    pub fn set_customer(&mut self, customer_id: impl Into<String>) {
        self.customer_id = Some(customer_id.into());
    }

    pub fn clear_customer(&mut self) {
        self.customer_id = None;
    }

    pub fn lines(&self) -> &[DraftLine] {
        &self.lines
    }

    /// Append an empty line and return its handle.
    pub fn add_line(&mut self) -> LineId {
        let line = DraftLine::empty();
        let id = line.id;
        self.lines.push(line);
        debug!(line = %id, lines = self.lines.len(), "added draft line");
        id
    }

    /// Remove a line. The first line is fixed so that a draft always
    /// keeps at least one line.
    pub fn remove_line(&mut self, id: LineId) -> Result<(), DraftError> {
        let index = self
            .lines
            .iter()
            .position(|l| l.id == id)
            .ok_or(DraftError::UnknownLine)?;
        if index == 0 {
            return Err(DraftError::FirstLine);
        }
        self.lines.remove(index);
        debug!(line = %id, lines = self.lines.len(), "removed draft line");
        Ok(())
    }

    /// Bind a line to a snapshot of `product` taken now.
    pub fn set_line_product(&mut self, id: LineId, product: &Product) -> Result<(), DraftError> {
        let line = self.line_mut(id)?;
        debug!(
            line = %id,
            product_id = %product.product_id,
            price = product.price,
            stock = product.stock_quantity,
            "bound product snapshot to draft line"
        );
        line.product = Some(product.clone());
        Ok(())
    }

    pub fn set_line_quantity(&mut self, id: LineId, quantity: u32) -> Result<(), DraftError> {
        let line = self.line_mut(id)?;
        line.quantity = quantity;
        Ok(())
    }

    pub fn line(&self, id: LineId) -> Option<&DraftLine> {
        self.lines.iter().find(|l| l.id == id)
    }

    /// Whether one line currently passes validation.
    pub fn line_is_valid(&self, id: LineId) -> bool {
        self.line(id).is_some_and(|l| l.validate().is_ok())
    }

    /// Sum of `quantity * price` over all lines, recomputable at any
    /// point during composition.
    pub fn total(&self) -> f64 {
        self.lines.iter().map(DraftLine::subtotal).sum()
    }

    /// Whether the draft would currently pass submission checks.
    pub fn is_submittable(&self) -> bool {
        self.build_request().is_ok()
    }

    /// Run every submission precondition and produce the request body.
    ///
    /// Checks, in order: a customer is selected, the draft has at least
    /// one line, every line has a product, every line validates. The
    /// first failure is returned with the 1-based line position; nothing
    /// here touches the network, so a rejected draft costs no API call.
    pub fn build_request(&self) -> Result<CreateOrderRequest, DraftError> {
        let customer_id = self.customer_id.clone().ok_or(DraftError::NoCustomer)?;
        if self.lines.is_empty() {
            return Err(DraftError::NoLines);
        }

        let mut items = Vec::with_capacity(self.lines.len());
        for (index, line) in self.lines.iter().enumerate() {
            let line_no = index + 1;
            let product = line
                .product
                .as_ref()
                .ok_or(DraftError::MissingProduct { line: line_no })?;
            line.validate().map_err(|issue| DraftError::InvalidLine {
                line: line_no,
                issue,
            })?;
            items.push(NewOrderItem {
                product_id: product.product_id.clone(),
                quantity: line.quantity,
            });
        }

        info!(
            customer_id = %customer_id,
            items = items.len(),
            total = self.total(),
            "draft order ready for submission"
        );
        Ok(CreateOrderRequest { customer_id, items })
    }

    /// Discard everything and return to the `new()` state.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    fn line_mut(&mut self, id: LineId) -> Result<&mut DraftLine, DraftError> {
        self.lines
            .iter_mut()
            .find(|l| l.id == id)
            .ok_or(DraftError::UnknownLine)
    }
}

impl Default for DraftOrder {
    fn default() -> Self {
        Self::new()
    }
}
