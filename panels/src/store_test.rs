use super::*;
use crate::view::Load;

const BIG_BOX: &[Item] = &[
    Item {
        code: "RNG_BOX_HUGE",
        name: "Random point box (XL)",
        price: 100,
        description: "",
        sellable: true,
        random_box: true,
    },
    Item {
        code: "COFFEE_AMERICANO",
        name: "Americano",
        price: 180,
        description: "",
        sellable: true,
        random_box: false,
    },
];

fn page(total_point: i64) -> MyPage {
    MyPage { total_point, ..MyPage::default() }
}

fn open(catalog: &'static [Item], points: i64) -> Store {
    let mut store = Store::new(catalog);
    let ticket = store.begin_enter();
    assert!(store.loaded(ticket, &page(points), None));
    store
}

#[test]
fn buttons_reflect_balance_and_availability() {
    let store = open(CATALOG, 100);
    let labels: Vec<_> = store.catalog().iter().map(|item| store.button(item)).collect();
    assert_eq!(
        labels,
        [
            BuyButton::Buy,
            BuyButton::Buy,
            BuyButton::Insufficient,
            BuyButton::Insufficient,
            BuyButton::ComingSoon,
            BuyButton::ComingSoon,
        ]
    );
}

#[test]
fn random_box_without_reward_scenario() {
    let mut store = open(BIG_BOX, 100);
    store.select("RNG_BOX_HUGE").expect("select");
    let (ticket, request) = store.begin_purchase("u1").expect("purchase");
    assert_eq!(request.price, 100);
    assert_eq!(request.item_code, "RNG_BOX_HUGE");

    let toast = store
        .purchased(ticket, PurchaseReply { ok: true, total_point: 80, rng_gain: 0 })
        .expect("applied");
    assert_eq!(toast, PurchaseToast::NoReward);
    assert_eq!(store.points(), 80);
    assert_eq!(store.view().phase(), &StorePhase::Browsing);
}

#[test]
fn reward_and_plain_purchase_toasts() {
    let mut store = open(CATALOG, 500);
    store.select("RNG_BOX_BIG").expect("select");
    let (ticket, _) = store.begin_purchase("u1").expect("purchase");
    let toast = store.purchased(ticket, PurchaseReply { ok: true, total_point: 515, rng_gain: 65 });
    assert_eq!(toast, Some(PurchaseToast::Reward(65)));
    assert_eq!(store.points(), 515);

    store.select("COFFEE_LATTE").expect("select");
    let (ticket, _) = store.begin_purchase("u1").expect("purchase");
    let toast = store.purchased(ticket, PurchaseReply { ok: true, total_point: 315, rng_gain: 0 });
    assert_eq!(toast.map(|t| t.text()), Some("Purchased: Caffè latte".to_owned()));
}

#[test]
fn not_ok_reply_is_a_failure() {
    let mut store = open(CATALOG, 100);
    store.select("RNG_BOX_SMALL").expect("select");
    let (ticket, _) = store.begin_purchase("u1").expect("purchase");
    let toast = store.purchased(ticket, PurchaseReply { ok: false, total_point: 0, rng_gain: 0 });
    assert_eq!(toast, Some(PurchaseToast::Failed(MSG_NOT_OK.to_owned())));
    assert_eq!(store.points(), 100);
    assert!(!store.view().is_pending());
}

#[test]
fn unaffordable_and_unsellable_items_cannot_be_selected() {
    let mut store = open(CATALOG, 30);
    assert_eq!(store.select("RNG_BOX_BIG"), Err(SubmitRejected::NotAccepting));
    assert_eq!(store.select("ICECREAM_CONE"), Err(SubmitRejected::NotAccepting));
    assert_eq!(store.select("NOPE"), Err(SubmitRejected::MissingInput));
}

#[test]
fn double_confirm_purchases_once() {
    let mut store = open(CATALOG, 100);
    store.select("RNG_BOX_SMALL").expect("select");
    assert!(store.begin_purchase("u1").is_ok());
    assert_eq!(store.begin_purchase("u1").map(|_| ()), Err(SubmitRejected::Pending));
    assert_eq!(store.cancel(), Err(SubmitRejected::Pending));
}

#[test]
fn error_mapping_by_status_and_keyword() {
    let price = ApiError::Rejected { status: 400, detail: Some("가격 불일치".to_owned()) };
    assert_eq!(purchase_error_message(&price), MSG_PRICE_MISMATCH);
    let points = ApiError::Rejected { status: 400, detail: Some("포인트가 부족합니다.".to_owned()) };
    assert_eq!(purchase_error_message(&points), MSG_INSUFFICIENT);
    let other = ApiError::Rejected { status: 400, detail: Some("bad code".to_owned()) };
    assert_eq!(purchase_error_message(&other), "bad code");
    let missing = ApiError::Rejected { status: 404, detail: None };
    assert_eq!(purchase_error_message(&missing), MSG_USER_NOT_FOUND);
    let server = ApiError::Server { status: 503, detail: None };
    assert_eq!(purchase_error_message(&server), crate::error::MSG_SERVER);
    let transport = ApiError::Transport(String::new());
    assert_eq!(purchase_error_message(&transport), crate::error::MSG_TRANSPORT);
}

#[test]
fn failed_purchase_keeps_confirmation_open() {
    let mut store = open(CATALOG, 100);
    store.select("RNG_BOX_SMALL").expect("select");
    let (ticket, _) = store.begin_purchase("u1").expect("purchase");
    let points = ApiError::Rejected { status: 400, detail: Some("포인트 부족".to_owned()) };
    let toast = store.purchase_failed(ticket, &points);
    assert_eq!(toast, Some(PurchaseToast::Failed(MSG_INSUFFICIENT.to_owned())));
    assert_eq!(store.view().phase(), &StorePhase::Confirming { code: "RNG_BOX_SMALL" });
    assert!(store.cancel().is_ok());
}

#[test]
fn entry_falls_back_to_cached_points() {
    let mut store = Store::default();
    let ticket = store.begin_enter();
    store.loaded(ticket, &MyPage { message: Some("UserNotFound".to_owned()), ..MyPage::default() }, Some(42));
    assert_eq!(store.points(), 42);

    let mut offline = Store::default();
    let ticket = offline.begin_enter();
    offline.failed(ticket, &ApiError::Transport(String::new()), Some(7));
    assert_eq!(offline.points(), 7);

    let mut cold = Store::default();
    let ticket = cold.begin_enter();
    cold.failed(ticket, &ApiError::Transport(String::new()), None);
    assert!(matches!(cold.view().load(), Load::Failed(_)));
}
