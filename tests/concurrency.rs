//! Exercises the testable properties of the drop-sale concurrency core
//! (no oversell, idempotent webhook replay, at-most-one token per order,
//! the drop-size cap, and symbicode first-activation) against a real
//! temp-file SQLite database.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use limited_drop_platform::db::Database;
use limited_drop_platform::notifications::email::{EmailSink, ReceiptOutcome};
use limited_drop_platform::notifications::gateway_client::MockPaymentGateway;
use limited_drop_platform::notifications::sheets::SpreadsheetSink;
use limited_drop_platform::notifications::{NotificationQueue, PaymentGateway};
use limited_drop_platform::orders::OrderStatus;
use limited_drop_platform::payment::PaymentService;
use limited_drop_platform::purchase::{PurchaseRequest, PurchaseService};

struct CountingEmailSink {
    winners: AtomicUsize,
    losers: AtomicUsize,
}

impl CountingEmailSink {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            winners: AtomicUsize::new(0),
            losers: AtomicUsize::new(0),
        })
    }
}

#[async_trait]
impl EmailSink for CountingEmailSink {
    async fn send_order_confirmation(&self, _to: &str, _order_number: &str) {}

    async fn send_symbicode_receipt(
        &self,
        _to: &str,
        _phone: &str,
        outcome: ReceiptOutcome,
        _symbicode: Option<&str>,
    ) {
        match outcome {
            ReceiptOutcome::Winner => self.winners.fetch_add(1, Ordering::SeqCst),
            ReceiptOutcome::Loser => self.losers.fetch_add(1, Ordering::SeqCst),
        };
    }
}

struct NullSheetSink;

#[async_trait]
impl SpreadsheetSink for NullSheetSink {
    async fn append_order(&self, _order_number: &str, _phone: &str, _total_amount: i64) {}
}

struct Harness {
    db: Arc<Database>,
    purchase: PurchaseService,
    payment: PaymentService,
    notifications: Arc<NotificationQueue>,
    emails: Arc<CountingEmailSink>,
    // Keeps the tempdir alive for the duration of the test.
    _dir: tempfile::TempDir,
}

async fn harness(total_stock: i64, drop_size: i64) -> Harness {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("test.db");
    let db = Arc::new(
        Database::connect(path.to_str().unwrap(), 8, Duration::from_secs(5))
            .await
            .unwrap(),
    );
    db.run_migrations().await.unwrap();

    sqlx::query("INSERT INTO products (id, name, price) VALUES (1, 'Hoodie', 50000)")
        .execute(db.writer())
        .await
        .unwrap();
    sqlx::query(
        "INSERT INTO limited_drops (id, product_id, name, start_time, total_stock, drop_size, sold, is_active)
         VALUES (1, 1, 'Drop', '2000-01-01T00:00:00Z', ?, ?, 0, 1)",
    )
    .bind(total_stock)
    .bind(drop_size)
    .execute(db.writer())
    .await
    .unwrap();

    let gateway: Arc<dyn PaymentGateway> = Arc::new(MockPaymentGateway {
        frontend_url: "http://localhost".to_string(),
    });
    let notifications = NotificationQueue::new();
    let emails = CountingEmailSink::new();
    notifications
        .clone()
        .spawn_drain_loop(emails.clone(), Arc::new(NullSheetSink));

    let purchase = PurchaseService::new(db.clone(), gateway, "http://localhost".to_string());
    let payment = PaymentService::new(db.clone(), notifications.clone());

    Harness {
        db,
        purchase,
        payment,
        notifications,
        emails,
        _dir: dir,
    }
}

fn request(phone: &str, quantity: i64) -> PurchaseRequest {
    PurchaseRequest {
        quantity,
        name: "Jane".to_string(),
        phone: phone.to_string(),
        email: format!("{phone}@example.com"),
        address: "1 Main St".to_string(),
        province: "HCM".to_string(),
        district: "D1".to_string(),
        ward: "W1".to_string(),
    }
}

async fn drain_settle() {
    tokio::time::sleep(Duration::from_millis(100)).await;
}

/// S1: one unit of stock, one purchaser, one PAID order, one symbicode.
#[tokio::test]
async fn lone_winner_gets_paid_and_a_token() {
    let h = harness(1, 1).await;

    let result = h.purchase.purchase(1, &request("0900000001", 1)).await.unwrap();
    h.payment.confirm_payment(result.order_code).await.unwrap();

    let executor = h.db.executor();
    let order = limited_drop_platform::orders::OrderRepository::new(&executor)
        .get_by_payment_order_code(result.order_code)
        .await
        .unwrap();
    assert_eq!(order.status(), OrderStatus::Paid);

    let symbicode_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM symbicodes WHERE order_id = ?")
        .bind(order.id)
        .fetch_one(h.db.reader())
        .await
        .unwrap();
    assert_eq!(symbicode_count, 1);

    let drop = limited_drop_platform::drops::DropRepository::new(&executor)
        .get_by_id(1)
        .await
        .unwrap();
    assert_eq!(drop.sold, 1);

    drain_settle().await;
    assert_eq!(h.emails.winners.load(Ordering::SeqCst), 1);
    assert_eq!(h.emails.losers.load(Ordering::SeqCst), 0);
}

/// S2: a hundred concurrent purchase+webhook flows race for a single seat.
/// Exactly one order is PAID; the rest are CANCELLED; sold never exceeds 1.
#[tokio::test]
async fn hundred_racers_one_seat() {
    let h = Arc::new(harness(1, 1).await);

    let mut order_codes = Vec::with_capacity(100);
    for i in 0..100 {
        let result = h
            .purchase
            .purchase(1, &request(&format!("09{i:08}"), 1))
            .await
            .unwrap();
        order_codes.push(result.order_code);
    }

    let mut handles = Vec::with_capacity(100);
    for code in order_codes {
        let h = h.clone();
        handles.push(tokio::spawn(
            async move { h.payment.confirm_payment(code).await },
        ));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let executor = h.db.executor();
    let paid: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM orders WHERE status = 'paid'")
        .fetch_one(h.db.reader())
        .await
        .unwrap();
    let cancelled: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM orders WHERE status = 'cancelled'")
        .fetch_one(h.db.reader())
        .await
        .unwrap();
    assert_eq!(paid, 1);
    assert_eq!(cancelled, 99);

    let drop = limited_drop_platform::drops::DropRepository::new(&executor)
        .get_by_id(1)
        .await
        .unwrap();
    assert_eq!(drop.sold, 1);

    let symbicode_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM symbicodes")
        .fetch_one(h.db.reader())
        .await
        .unwrap();
    assert_eq!(symbicode_count, 1);

    drain_settle().await;
    assert_eq!(h.emails.winners.load(Ordering::SeqCst), 1);
    assert_eq!(h.emails.losers.load(Ordering::SeqCst), 99);
}

/// S3: total_stock=100, drop_size=10. 20 purchases, each immediately
/// confirmed by its webhook, race to drive `sold` up; once `sold` reaches
/// `drop_size` the phase-1 pre-check rejects every later purchase with
/// `DROP_SIZE_LIMIT` even though `total_stock` is far from exhausted.
#[tokio::test]
async fn drop_size_cap_limits_admission() {
    let h = harness(100, 10).await;

    let mut admitted = 0;
    let mut rejected = 0;
    for i in 0..20 {
        match h.purchase.purchase(1, &request(&format!("09{i:08}"), 1)).await {
            Ok(result) => {
                admitted += 1;
                h.payment.confirm_payment(result.order_code).await.unwrap();
            }
            Err(_) => rejected += 1,
        }
    }

    assert_eq!(admitted, 10);
    assert_eq!(rejected, 10);

    let executor = h.db.executor();
    let drop = limited_drop_platform::drops::DropRepository::new(&executor)
        .get_by_id(1)
        .await
        .unwrap();
    assert_eq!(drop.sold, 10);

    let paid: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM orders WHERE status = 'paid'")
        .fetch_one(h.db.reader())
        .await
        .unwrap();
    assert_eq!(paid, 10);
}

/// S4: replaying the same webhook payload after it has already been
/// processed is a silent no-op — no new state change, no new receipts.
#[tokio::test]
async fn webhook_replay_is_idempotent() {
    let h = harness(1, 1).await;

    let result = h.purchase.purchase(1, &request("0900000001", 1)).await.unwrap();
    h.payment.confirm_payment(result.order_code).await.unwrap();
    drain_settle().await;
    assert_eq!(h.emails.winners.load(Ordering::SeqCst), 1);

    for _ in 0..3 {
        h.payment.confirm_payment(result.order_code).await.unwrap();
    }
    drain_settle().await;

    assert_eq!(h.emails.winners.load(Ordering::SeqCst), 1);
    assert_eq!(h.emails.losers.load(Ordering::SeqCst), 0);

    let executor = h.db.executor();
    let drop = limited_drop_platform::drops::DropRepository::new(&executor)
        .get_by_id(1)
        .await
        .unwrap();
    assert_eq!(drop.sold, 1);
}

/// S6: a symbicode activates on first verification and stays activated.
#[tokio::test]
async fn symbicode_activates_once() {
    let h = harness(1, 1).await;

    let result = h.purchase.purchase(1, &request("0900000001", 1)).await.unwrap();
    h.payment.confirm_payment(result.order_code).await.unwrap();

    let executor = h.db.executor();
    let code: Vec<u8> = sqlx::query_scalar("SELECT code FROM symbicodes LIMIT 1")
        .fetch_one(h.db.reader())
        .await
        .unwrap();
    let code = uuid::Uuid::from_slice(&code).unwrap().to_string();

    let service = limited_drop_platform::symbicode::SymbicodeService::new(&executor);
    let (_, first) = service.verify(&code, Some("127.0.0.1")).await.unwrap();
    assert!(first);

    let (_, second) = service.verify(&code, Some("127.0.0.1")).await.unwrap();
    assert!(!second);
}
