//! Point store: catalog, buy confirmation, and purchase outcome mapping.
//!
//! The balance shown is always the server's `total_point` from the last
//! purchase reply (or the profile fetch on entry); it is never computed
//! locally from price and reward.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use crate::api::{MyPage, PurchaseReply, PurchaseRequest};
use crate::error::ApiError;
use crate::view::{Notice, PageView, Phase, SubmitRejected, Ticket, Tone};

pub const MSG_PRICE_MISMATCH: &str = "Price check failed. Refresh the store to get the latest prices.";
pub const MSG_INSUFFICIENT: &str = "You do not have enough points.";
pub const MSG_USER_NOT_FOUND: &str = "User not found. Please log in again.";
pub const MSG_NOT_OK: &str = "The purchase could not be completed.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Item {
    pub code: &'static str,
    pub name: &'static str,
    pub price: i64,
    pub description: &'static str,
    pub sellable: bool,
    /// Random point boxes can pay out nothing.
    pub random_box: bool,
}

/// Mirrors the server's price list; prices here are display hints and are
/// re-validated server-side.
pub const CATALOG: &[Item] = &[
    Item {
        code: "RNG_BOX_SMALL",
        name: "Random point box (S)",
        price: 20,
        description: "One of 0/8/20/25/100 points",
        sellable: true,
        random_box: true,
    },
    Item {
        code: "RNG_BOX_BIG",
        name: "Random point box (L)",
        price: 50,
        description: "One of 0/20/50/65/250 points",
        sellable: true,
        random_box: true,
    },
    Item {
        code: "COFFEE_AMERICANO",
        name: "Americano",
        price: 180,
        description: "Coffee voucher",
        sellable: true,
        random_box: false,
    },
    Item {
        code: "COFFEE_LATTE",
        name: "Caffè latte",
        price: 200,
        description: "Coffee voucher",
        sellable: true,
        random_box: false,
    },
    Item {
        code: "ICECREAM_CONE",
        name: "Ice-cream cone",
        price: 150,
        description: "Coming soon",
        sellable: false,
        random_box: false,
    },
    Item {
        code: "SANDWICH_BASIC",
        name: "Sandwich",
        price: 250,
        description: "Coming soon",
        sellable: false,
        random_box: false,
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuyButton {
    Buy,
    Insufficient,
    ComingSoon,
}

impl BuyButton {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Buy => "Buy",
            Self::Insufficient => "Not enough points",
            Self::ComingSoon => "Coming soon",
        }
    }
}

#[must_use]
pub fn button_for(item: &Item, points: i64) -> BuyButton {
    if !item.sellable {
        BuyButton::ComingSoon
    } else if points < item.price {
        BuyButton::Insufficient
    } else {
        BuyButton::Buy
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorePhase {
    Browsing,
    Confirming { code: &'static str },
}

impl Phase for StorePhase {
    fn accepts_input(&self) -> bool {
        true
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PurchaseToast {
    Reward(i64),
    NoReward,
    Purchased(String),
    Failed(String),
}

impl PurchaseToast {
    #[must_use]
    pub fn text(&self) -> String {
        match self {
            Self::Reward(gain) => format!("🎁 Reward +{gain}P"),
            Self::NoReward => "😵‍💫 No luck! Reward 0P".to_owned(),
            Self::Purchased(name) => format!("Purchased: {name}"),
            Self::Failed(message) => message.clone(),
        }
    }

    #[must_use]
    pub fn notice(&self) -> Notice {
        let tone = if matches!(self, Self::Failed(_)) { Tone::Error } else { Tone::Success };
        Notice { tone, text: self.text() }
    }
}

/// User-facing text for a failed purchase.
#[must_use]
pub fn purchase_error_message(err: &ApiError) -> String {
    match err {
        ApiError::Rejected { status: 400, detail } => {
            let detail = detail.as_deref().unwrap_or_default();
            if detail.contains("가격") {
                MSG_PRICE_MISMATCH.to_owned()
            } else if detail.contains("포인트") {
                MSG_INSUFFICIENT.to_owned()
            } else {
                err.user_message()
            }
        }
        ApiError::Rejected { status: 404, .. } => MSG_USER_NOT_FOUND.to_owned(),
        _ => err.user_message(),
    }
}

#[derive(Debug, Clone)]
pub struct Store {
    view: PageView<StorePhase, i64>,
    catalog: &'static [Item],
}

impl Default for Store {
    fn default() -> Self {
        Self::new(CATALOG)
    }
}

impl Store {
    #[must_use]
    pub fn new(catalog: &'static [Item]) -> Self {
        Self { view: PageView::new(StorePhase::Browsing), catalog }
    }

    #[must_use]
    pub fn view(&self) -> &PageView<StorePhase, i64> {
        &self.view
    }

    #[must_use]
    pub fn catalog(&self) -> &'static [Item] {
        self.catalog
    }

    #[must_use]
    pub fn points(&self) -> i64 {
        self.view.status().copied().unwrap_or_default()
    }

    #[must_use]
    pub fn item(&self, code: &str) -> Option<&'static Item> {
        self.catalog.iter().find(|item| item.code == code)
    }

    #[must_use]
    pub fn button(&self, item: &Item) -> BuyButton {
        button_for(item, self.points())
    }

    /// Item awaiting confirmation.
    #[must_use]
    pub fn confirming(&self) -> Option<&'static Item> {
        match self.view.phase() {
            StorePhase::Confirming { code } => self.item(code),
            StorePhase::Browsing => None,
        }
    }

    pub fn begin_enter(&mut self) -> Ticket {
        self.view.begin_enter()
    }

    /// Balance from the profile, or the cached points when the profile is
    /// an error shape.
    pub fn loaded(&mut self, ticket: Ticket, page: &MyPage, cached: Option<i64>) -> bool {
        let points = if page.message.is_some() { cached.unwrap_or_default() } else { page.total_point };
        self.view.enter_loaded(ticket, points, StorePhase::Browsing)
    }

    /// Falls back to the cached balance when there is one.
    pub fn failed(&mut self, ticket: Ticket, err: &ApiError, cached: Option<i64>) -> bool {
        match cached {
            Some(points) => {
                log::warn!("store: balance sync failed, using cached points: {err}");
                self.view.enter_loaded(ticket, points, StorePhase::Browsing)
            }
            None => self.view.enter_failed(ticket, err),
        }
    }

    /// Open the confirmation for a buyable item.
    ///
    /// # Errors
    ///
    /// Refused for unknown, unsellable or unaffordable items.
    pub fn select(&mut self, code: &str) -> Result<(), SubmitRejected> {
        let item = self.item(code).ok_or(SubmitRejected::MissingInput)?;
        if self.button(item) != BuyButton::Buy || !self.view.inputs_enabled() {
            return Err(SubmitRejected::NotAccepting);
        }
        self.view.advance(StorePhase::Confirming { code: item.code })
    }

    /// # Errors
    ///
    /// Refused while a purchase is in flight.
    pub fn cancel(&mut self) -> Result<(), SubmitRejected> {
        self.view.advance(StorePhase::Browsing)
    }

    /// # Errors
    ///
    /// Refused unless an item is being confirmed and nothing is in flight.
    pub fn begin_purchase(&mut self, user_id: &str) -> Result<(Ticket, PurchaseRequest), SubmitRejected> {
        let item = self.confirming().ok_or(SubmitRejected::NotAccepting)?;
        let ticket = self.view.begin_submit()?;
        let request = PurchaseRequest {
            user_id: user_id.to_owned(),
            item_code: item.code.to_owned(),
            item_name: item.name.to_owned(),
            price: item.price,
        };
        Ok((ticket, request))
    }

    /// Apply a purchase reply. `ok == false` is a failure.
    pub fn purchased(&mut self, ticket: Ticket, reply: PurchaseReply) -> Option<PurchaseToast> {
        let item = self.confirming()?;
        if !reply.ok {
            return self
                .view
                .submit_failed_with(ticket, MSG_NOT_OK)
                .then(|| PurchaseToast::Failed(MSG_NOT_OK.to_owned()));
        }
        let applied = self.view.submit_succeeded(
            ticket,
            |balance| *balance = Some(reply.total_point),
            StorePhase::Browsing,
        );
        if !applied {
            return None;
        }
        Some(if reply.rng_gain > 0 {
            PurchaseToast::Reward(reply.rng_gain)
        } else if item.random_box {
            PurchaseToast::NoReward
        } else {
            PurchaseToast::Purchased(item.name.to_owned())
        })
    }

    pub fn purchase_failed(&mut self, ticket: Ticket, err: &ApiError) -> Option<PurchaseToast> {
        let message = purchase_error_message(err);
        self.view
            .submit_failed_with(ticket, message.clone())
            .then_some(PurchaseToast::Failed(message))
    }
}
