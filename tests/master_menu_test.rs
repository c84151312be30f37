//! Master menu tests

mod helpers;

use helpers::*;
use NailBuddy::database::Record;
use NailBuddy::handlers::Command;
use NailBuddy::messenger::Markup;
use NailBuddy::state::{flows, steps};
use NailBuddy::texts;

fn salon_week() -> Vec<Record> {
    vec![
        appointment_record("p1", CLIENT_ID, date(15), "10:00", "confirmed"),
        appointment_record("t2", OTHER_CLIENT_ID, date(16), "15:00", "confirmed"),
        appointment_record("t1", CLIENT_ID, date(16), "12:00", "confirmed"),
        appointment_record("m1", CLIENT_ID, date(17), "09:00", "confirmed"),
        appointment_record("m2", OTHER_CLIENT_ID, date(17), "11:00", "cancelled"),
    ]
}

async fn open_master_menu() -> TestContext {
    let ctx = TestContext::new(store_with_client(salon_week()), test_now());
    ctx.command(MASTER_ID, Command::Master).await;
    ctx
}

#[tokio::test]
async fn test_non_master_is_denied() {
    let ctx = TestContext::new(store_with_client(salon_week()), test_now());

    ctx.text(CLIENT_ID, texts::BTN_MASTER_MODE).await;
    assert_eq!(ctx.messenger.last_text_to(CLIENT_ID).unwrap(), texts::ACCESS_DENIED);
    assert!(ctx.conversation(CLIENT_ID).await.is_none());

    // Master buttons mean nothing outside the master menu
    ctx.text(CLIENT_ID, texts::BTN_MASTER_STATS).await;
    assert_eq!(ctx.messenger.last_text_to(CLIENT_ID).unwrap(), texts::UNKNOWN_INPUT);
}

#[tokio::test]
async fn test_master_opens_menu() {
    let ctx = open_master_menu().await;

    let reply = ctx.messenger.last_to(MASTER_ID).unwrap();
    assert_eq!(reply.message().text, texts::MASTER_MENU_TITLE);
    assert!(matches!(reply.message().markup, Markup::Reply { .. }));
    assert!(ctx.conversation(MASTER_ID).await.unwrap().is_at(flows::MASTER_MENU, steps::MENU));
}

#[tokio::test]
async fn test_today_listing_sorted_by_time() {
    let ctx = open_master_menu().await;

    ctx.text(MASTER_ID, texts::BTN_MASTER_TODAY).await;

    let listing = ctx.messenger.last_text_to(MASTER_ID).unwrap();
    assert!(listing.starts_with("📋 Записи на сегодня"));
    assert!(listing.find("12:00").unwrap() < listing.find("15:00").unwrap());
    assert!(listing.contains(CLIENT_PHONE));
    // Menu stays open
    assert!(ctx.conversation(MASTER_ID).await.unwrap().is_at(flows::MASTER_MENU, steps::MENU));
}

#[tokio::test]
async fn test_tomorrow_listing_skips_cancelled() {
    let ctx = open_master_menu().await;

    ctx.text(MASTER_ID, texts::BTN_MASTER_TOMORROW).await;

    let listing = ctx.messenger.last_text_to(MASTER_ID).unwrap();
    assert!(listing.contains("09:00"));
    assert!(!listing.contains("11:00"));
}

#[tokio::test]
async fn test_empty_day_listing() {
    let ctx = TestContext::new(store_with_client(vec![]), test_now());
    ctx.command(MASTER_ID, Command::Master).await;

    ctx.text(MASTER_ID, texts::BTN_MASTER_TOMORROW).await;

    assert_eq!(ctx.messenger.last_text_to(MASTER_ID).unwrap(), texts::day_listing("завтра", &[]));
}

#[tokio::test]
async fn test_all_active_grouped_by_date() {
    let ctx = open_master_menu().await;

    ctx.text(MASTER_ID, texts::BTN_MASTER_ALL).await;

    let listing = ctx.messenger.last_text_to(MASTER_ID).unwrap();
    assert!(!listing.contains("15.10.2026"));
    assert!(listing.find("16.10.2026").unwrap() < listing.find("17.10.2026").unwrap());
    assert!(!listing.contains("11:00"));
}

#[tokio::test]
async fn test_statistics() {
    let ctx = open_master_menu().await;

    ctx.text(MASTER_ID, texts::BTN_MASTER_STATS).await;

    assert_eq!(
        ctx.messenger.last_text_to(MASTER_ID).unwrap(),
        texts::statistics(1, 5, 4, 1, 3, Some(("Маникюр", 4)))
    );
}

#[tokio::test]
async fn test_back_closes_menu() {
    let ctx = open_master_menu().await;

    ctx.text(MASTER_ID, texts::BTN_MASTER_BACK).await;

    assert_eq!(ctx.messenger.last_text_to(MASTER_ID).unwrap(), texts::MAIN_MENU_PROMPT);
    assert!(ctx.conversation(MASTER_ID).await.is_none());
}

#[tokio::test]
async fn test_unknown_text_shows_menu_again() {
    let ctx = open_master_menu().await;
    ctx.messenger.clear();

    ctx.text(MASTER_ID, "что-то ещё").await;

    assert_eq!(ctx.messenger.texts_to(MASTER_ID), vec![texts::MASTER_MENU_TITLE.to_string()]);
    assert!(ctx.conversation(MASTER_ID).await.is_some());
}

#[tokio::test]
async fn test_no_master_configured() {
    let mut settings = test_settings();
    settings.bot.master_user_id = None;
    let ctx = TestContext::with_settings(store_with_client(salon_week()), test_now(), settings);

    ctx.command(MASTER_ID, Command::Master).await;

    assert_eq!(ctx.messenger.last_text_to(MASTER_ID).unwrap(), texts::ACCESS_DENIED);
    assert!(ctx.conversation(MASTER_ID).await.is_none());
}
