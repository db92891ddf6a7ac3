//! Domain types for the shopping cart.
//!
//! A cart is an ordered list of line items. Each id appears at most once and
//! carries a quantity of at least one; an item whose last unit is removed
//! leaves the list entirely.

use serde::{Deserialize, Serialize};

/// Unique identifier for a line item
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    /// Creates an `ItemId` from any string-like value
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ItemId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single line item
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    /// Unique identifier
    pub id: ItemId,
    /// Display title
    pub title: String,
    /// Unit price
    pub price: f64,
    /// Number of units, always >= 1
    pub quantity: u32,
}

impl CartItem {
    /// Creates a line item with quantity 1
    #[must_use]
    pub fn new(id: ItemId, title: impl Into<String>, price: f64) -> Self {
        Self {
            id,
            title: title.into(),
            price,
            quantity: 1,
        }
    }

    /// `price × quantity`
    #[must_use]
    pub fn subtotal(&self) -> f64 {
        self.price * f64::from(self.quantity)
    }
}

/// Cart snapshot
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CartState {
    /// Line items in the order they were first added
    pub items: Vec<CartItem>,
}

impl CartState {
    /// Creates an empty cart
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Looks up a line item by id
    #[must_use]
    pub fn get(&self, id: &ItemId) -> Option<&CartItem> {
        self.items.iter().find(|item| &item.id == id)
    }

    /// Position of a line item in the list
    #[must_use]
    pub fn position(&self, id: &ItemId) -> Option<usize> {
        self.items.iter().position(|item| &item.id == id)
    }

    /// Sum over items of `price × quantity`
    #[must_use]
    pub fn total_price(&self) -> f64 {
        self.items.iter().map(CartItem::subtotal).sum()
    }

    /// Total number of units across all line items, saturating at `u32::MAX`
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items
            .iter()
            .fold(0_u32, |acc, item| acc.saturating_add(item.quantity))
    }

    /// Whether the cart holds no line items
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Cart actions
///
/// Tagged by `"type"` on the wire, e.g.
/// `{"type":"ADD_ITEM","id":"a","title":"Widget","price":9.99}`.
/// Any other tag decodes to [`CartAction::Unknown`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CartAction {
    /// Add one unit of an item, creating the line if needed
    AddItem {
        /// Item identifier
        id: ItemId,
        /// Display title, used only when the line is created
        title: String,
        /// Unit price, used only when the line is created
        price: f64,
    },
    /// Remove one unit of an item, dropping the line at zero
    RemoveItem {
        /// Item identifier
        id: ItemId,
    },
    /// Unrecognized action kind; never changes the cart
    #[serde(other)]
    Unknown,
}

impl CartAction {
    /// Shorthand for [`CartAction::AddItem`]
    #[must_use]
    pub fn add(id: impl Into<String>, title: impl Into<String>, price: f64) -> Self {
        Self::AddItem {
            id: ItemId::new(id),
            title: title.into(),
            price,
        }
    }

    /// Shorthand for [`CartAction::RemoveItem`]
    #[must_use]
    pub fn remove(id: impl Into<String>) -> Self {
        Self::RemoveItem { id: ItemId::new(id) }
    }

    /// Decodes an action from its JSON form
    ///
    /// # Errors
    ///
    /// Returns a `serde_json::Error` if the input is not a JSON object with a
    /// string `"type"` field, or if a known kind is missing payload fields.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
