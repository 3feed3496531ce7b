//! End-to-end poll cycle tests: scripted feeds, a real SQLite store,
//! and a recording notifier around the scheduler.

mod support;

use std::sync::Arc;
use std::time::Duration;

use dobby_tracker::adapter::store::SqliteSubscriptionStore;
use dobby_tracker::domain::{Network, UserId, Watermark};
use dobby_tracker::port::SubscriptionStore;
use dobby_tracker::scheduler::Scheduler;

use support::{addr, tx, FixedSummarizer, RecordingNotifier, ScriptedFeed, TempDb};

struct Rig {
    _db: TempDb,
    store: Arc<SqliteSubscriptionStore>,
    feed: Arc<ScriptedFeed>,
    notifier: Arc<RecordingNotifier>,
    scheduler: Scheduler,
}

fn rig(name: &str, summary: Option<&str>) -> Rig {
    let db = TempDb::create(name);
    let store = Arc::new(SqliteSubscriptionStore::new(db.pool().clone()));
    let feed = Arc::new(ScriptedFeed::default());
    let notifier = Arc::new(RecordingNotifier::default());

    let scheduler = Scheduler::new(
        store.clone(),
        feed.clone(),
        Arc::new(FixedSummarizer(summary.map(String::from))),
        notifier.clone(),
        Duration::from_secs(60),
    )
    .with_delays(Duration::ZERO, Duration::ZERO);

    Rig {
        _db: db,
        store,
        feed,
        notifier,
        scheduler,
    }
}

#[tokio::test]
async fn first_poll_notifies_and_advances_watermark() {
    let rig = rig("e2e-first", None);
    let address = addr('a');
    rig.store
        .add_subscription(UserId(1), &address, Network::Mainnet)
        .unwrap();

    rig.feed.push_native(vec![tx("0xh1", 100)]);
    rig.scheduler.tick().await;

    let sent = rig.notifier.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].0, 1);
    assert!(sent[0].1.contains("Hash: 0xh1"));
    assert!(sent[0].1.contains("INCOMING"));

    let wm = rig.store.watermark(&address, Network::Mainnet).unwrap();
    assert_eq!(wm, Watermark::new(100, "0xh1"));
}

#[tokio::test]
async fn quiet_second_poll_changes_nothing() {
    let rig = rig("e2e-quiet", None);
    let address = addr('a');
    rig.store
        .add_subscription(UserId(1), &address, Network::Mainnet)
        .unwrap();

    // Same upstream snapshot on both polls.
    rig.feed.push_native(vec![tx("0xh1", 100)]);
    rig.feed.push_native(vec![tx("0xh1", 100)]);

    rig.scheduler.tick().await;
    rig.scheduler.tick().await;

    assert_eq!(rig.notifier.sent().len(), 1);
    let wm = rig.store.watermark(&address, Network::Mainnet).unwrap();
    assert_eq!(wm, Watermark::new(100, "0xh1"));
}

#[tokio::test]
async fn delivery_is_chronological_across_feeds() {
    let rig = rig("e2e-order", None);
    let address = addr('a');
    rig.store
        .add_subscription(UserId(1), &address, Network::Mainnet)
        .unwrap();

    rig.feed.push_native(vec![tx("0xa", 5), tx("0xb", 3)]);
    rig.feed.push_token(vec![
        {
            let mut t = tx("0xc", 8);
            t.kind = dobby_tracker::domain::TxKind::Token {
                symbol: "USDC".into(),
                name: "USD Coin".into(),
                decimals: 6,
            };
            t
        },
        tx("0xd", 3),
    ]);

    rig.scheduler.tick().await;

    let hashes: Vec<String> = rig
        .notifier
        .sent()
        .iter()
        .map(|(_, text)| {
            text.lines()
                .find_map(|l| l.strip_prefix("Hash: "))
                .expect("hash line")
                .to_string()
        })
        .collect();
    assert_eq!(hashes, vec!["0xd", "0xb", "0xa", "0xc"]);

    let wm = rig.store.watermark(&address, Network::Mainnet).unwrap();
    assert_eq!(wm, Watermark::new(8, "0xc"));
}

#[tokio::test]
async fn subscribers_share_one_watermark() {
    let rig = rig("e2e-shared", None);
    let address = addr('a');
    rig.store
        .add_subscription(UserId(1), &address, Network::Mainnet)
        .unwrap();
    rig.store
        .add_subscription(UserId(2), &address, Network::Mainnet)
        .unwrap();

    rig.feed.push_native(vec![tx("0xh1", 100)]);
    rig.scheduler.tick().await;

    let sent = rig.notifier.sent();
    let recipients: Vec<i64> = sent.iter().map(|(u, _)| *u).collect();
    assert_eq!(recipients, vec![1, 2]);

    let wm = rig.store.watermark(&address, Network::Mainnet).unwrap();
    assert_eq!(wm, Watermark::new(100, "0xh1"));
}

#[tokio::test]
async fn one_blocked_chat_does_not_stop_the_batch() {
    let rig = rig("e2e-blocked", None);
    let address = addr('a');
    rig.store
        .add_subscription(UserId(1), &address, Network::Mainnet)
        .unwrap();
    rig.store
        .add_subscription(UserId(2), &address, Network::Mainnet)
        .unwrap();
    rig.notifier.refuse(UserId(1));

    rig.feed.push_native(vec![tx("0xh1", 100)]);
    rig.scheduler.tick().await;

    let sent = rig.notifier.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].0, 2);

    // The watermark still advances: delivery is best-effort.
    let wm = rig.store.watermark(&address, Network::Mainnet).unwrap();
    assert_eq!(wm, Watermark::new(100, "0xh1"));
}

#[tokio::test]
async fn token_feed_failure_does_not_mask_native_feed() {
    let rig = rig("e2e-feedfail", None);
    let address = addr('a');
    rig.store
        .add_subscription(UserId(1), &address, Network::Mainnet)
        .unwrap();

    // Token feed script left empty: the failed feed degrades to [].
    rig.feed.push_native(vec![tx("0xh1", 100)]);
    rig.scheduler.tick().await;

    assert_eq!(rig.notifier.sent().len(), 1);
}

#[tokio::test]
async fn outgoing_direction_is_reported() {
    let rig = rig("e2e-outgoing", None);
    let address = addr('a');
    rig.store
        .add_subscription(UserId(1), &address, Network::Mainnet)
        .unwrap();

    let mut t = tx("0xh1", 100);
    t.from = address.as_str().to_string();
    t.to = format!("0x{}", "b".repeat(40));
    rig.feed.push_native(vec![t]);

    rig.scheduler.tick().await;

    assert!(rig.notifier.sent()[0].1.contains("OUTGOING"));
}

#[tokio::test]
async fn summary_line_is_appended_when_available() {
    let rig = rig("e2e-summary", Some("Someone moved one ether."));
    let address = addr('a');
    rig.store
        .add_subscription(UserId(1), &address, Network::Mainnet)
        .unwrap();

    rig.feed.push_native(vec![tx("0xh1", 100)]);
    rig.scheduler.tick().await;

    let text = &rig.notifier.sent()[0].1;
    assert!(text.ends_with("\n\nDobby: Someone moved one ether."));
}

#[tokio::test]
async fn missing_summary_degrades_to_structured_message() {
    let rig = rig("e2e-nosummary", None);
    let address = addr('a');
    rig.store
        .add_subscription(UserId(1), &address, Network::Mainnet)
        .unwrap();

    rig.feed.push_native(vec![tx("0xh1", 100)]);
    rig.scheduler.tick().await;

    let text = &rig.notifier.sent()[0].1;
    assert!(text.contains("Hash: 0xh1"));
    assert!(!text.contains("Dobby:"));
}

#[tokio::test]
async fn untracked_pairs_are_not_polled() {
    let rig = rig("e2e-none", None);

    rig.feed.push_native(vec![tx("0xh1", 100)]);
    rig.scheduler.tick().await;

    // No subscriptions: the scripted response is never consumed.
    assert!(rig.notifier.sent().is_empty());
}
