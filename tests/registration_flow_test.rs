//! Client registration flow tests

mod helpers;

use helpers::*;
use NailBuddy::database::{FailureMode, InMemoryStore, Sheet};
use NailBuddy::handlers::Command;
use NailBuddy::messenger::Markup;
use NailBuddy::state::{flows, steps};
use NailBuddy::texts;

const NEW_USER: i64 = 2001;

fn fresh_salon() -> InMemoryStore {
    InMemoryStore::with_records([(Sheet::Services, salon_services())])
}

#[tokio::test]
async fn test_registration_with_shared_contact() {
    let ctx = TestContext::new(fresh_salon(), test_now());

    ctx.command(NEW_USER, Command::Start).await;
    let greeting = ctx.messenger.last_to(NEW_USER).unwrap();
    assert_eq!(greeting.message().text, texts::greeting("Anna"));
    assert_eq!(greeting.message().markup, Markup::RemoveReply);
    assert!(ctx.conversation(NEW_USER).await.unwrap().is_at(flows::REGISTRATION, steps::NAME_INPUT));

    ctx.text(NEW_USER, "Мария").await;
    assert_eq!(ctx.messenger.last_text_to(NEW_USER).unwrap(), texts::ASK_PHONE);
    assert!(ctx.conversation(NEW_USER).await.unwrap().is_at(flows::REGISTRATION, steps::PHONE_CHOICE));

    ctx.contact(NEW_USER, "+79991112233").await;

    let clients = ctx.store.records(Sheet::Clients).await;
    assert_eq!(clients.len(), 1);
    assert_eq!(clients[0]["user_id"], NEW_USER.to_string());
    assert_eq!(clients[0]["client_name"], "Мария");
    assert_eq!(clients[0]["phone"], "+79991112233");
    assert_eq!(clients[0]["username"], "anna_nails");
    assert_eq!(clients[0]["registered_at"], "2026-10-16 10:30:00");

    let texts_sent = ctx.messenger.texts_to(NEW_USER);
    let tail = &texts_sent[texts_sent.len() - 2..];
    assert_eq!(tail[0], texts::registration_complete("Мария", "+79991112233"));
    assert_eq!(tail[1], texts::MAIN_MENU_PROMPT);
    assert!(ctx.conversation(NEW_USER).await.is_none());
}

#[tokio::test]
async fn test_registration_with_manual_phone() {
    let ctx = TestContext::new(fresh_salon(), test_now());

    ctx.command(NEW_USER, Command::Start).await;
    ctx.text(NEW_USER, "Мария").await;
    ctx.text(NEW_USER, texts::BTN_MANUAL_PHONE).await;
    assert_eq!(ctx.messenger.last_text_to(NEW_USER).unwrap(), texts::ASK_PHONE_MANUAL);

    ctx.text(NEW_USER, "123").await;
    assert_eq!(ctx.messenger.last_text_to(NEW_USER).unwrap(), texts::INVALID_PHONE);
    assert!(ctx.conversation(NEW_USER).await.unwrap().is_at(flows::REGISTRATION, steps::PHONE_MANUAL));
    assert!(ctx.store.records(Sheet::Clients).await.is_empty());

    ctx.text(NEW_USER, "no digits at all").await;
    assert_eq!(ctx.messenger.last_text_to(NEW_USER).unwrap(), texts::INVALID_PHONE);

    ctx.text(NEW_USER, "89991112233").await;
    let clients = ctx.store.records(Sheet::Clients).await;
    assert_eq!(clients.len(), 1);
    assert_eq!(clients[0]["phone"], "89991112233");
    assert_eq!(ctx.messenger.last_text_to(NEW_USER).unwrap(), texts::MAIN_MENU_PROMPT);
}

#[tokio::test]
async fn test_contact_accepted_while_typing_phone() {
    let ctx = TestContext::new(fresh_salon(), test_now());

    ctx.command(NEW_USER, Command::Start).await;
    ctx.text(NEW_USER, "Мария").await;
    ctx.text(NEW_USER, texts::BTN_MANUAL_PHONE).await;
    ctx.contact(NEW_USER, "+79991112233").await;

    assert_eq!(ctx.store.records(Sheet::Clients).await.len(), 1);
    assert!(ctx.conversation(NEW_USER).await.is_none());
}

#[tokio::test]
async fn test_existing_client_gets_main_menu() {
    let ctx = TestContext::new(store_with_client(vec![]), test_now());

    ctx.command(CLIENT_ID, Command::Start).await;

    let reply = ctx.messenger.last_to(CLIENT_ID).unwrap();
    assert_eq!(reply.message().text, texts::MAIN_MENU_PROMPT);
    assert!(matches!(reply.message().markup, Markup::Reply { .. }));
    assert!(ctx.conversation(CLIENT_ID).await.is_none());
    assert_eq!(ctx.store.records(Sheet::Clients).await.len(), 1);
}

#[tokio::test]
async fn test_store_failure_ends_registration() {
    let ctx = TestContext::new(fresh_salon(), test_now());

    ctx.command(NEW_USER, Command::Start).await;
    ctx.text(NEW_USER, "Мария").await;
    ctx.store.set_failure_mode(FailureMode::Writes).await;
    ctx.contact(NEW_USER, "+79991112233").await;

    assert_eq!(ctx.messenger.last_text_to(NEW_USER).unwrap(), texts::GENERIC_ERROR);
    assert!(ctx.conversation(NEW_USER).await.is_none());
    assert!(ctx.store.records(Sheet::Clients).await.is_empty());
}

#[tokio::test]
async fn test_cancel_command_aborts_registration() {
    let ctx = TestContext::new(fresh_salon(), test_now());

    ctx.command(NEW_USER, Command::Start).await;
    ctx.command(NEW_USER, Command::Cancel).await;
    assert_eq!(ctx.messenger.last_text_to(NEW_USER).unwrap(), texts::FLOW_ABORTED);
    assert!(ctx.conversation(NEW_USER).await.is_none());

    // The name prompt is gone, so free text is no longer taken as a name
    ctx.text(NEW_USER, "Мария").await;
    assert_eq!(ctx.messenger.last_text_to(NEW_USER).unwrap(), texts::UNKNOWN_INPUT);
    assert!(ctx.store.records(Sheet::Clients).await.is_empty());
}

#[tokio::test]
async fn test_contact_outside_registration() {
    let ctx = TestContext::new(store_with_client(vec![]), test_now());

    ctx.contact(CLIENT_ID, CLIENT_PHONE).await;

    assert_eq!(ctx.messenger.last_text_to(CLIENT_ID).unwrap(), texts::UNKNOWN_INPUT);
    assert_eq!(ctx.store.records(Sheet::Clients).await.len(), 1);
}

#[tokio::test]
async fn test_overlong_name_is_asked_again() {
    let ctx = TestContext::new(fresh_salon(), test_now());

    ctx.command(NEW_USER, Command::Start).await;
    ctx.text(NEW_USER, &"Мария".repeat(30)).await;

    assert_eq!(ctx.messenger.last_text_to(NEW_USER).unwrap(), texts::NAME_TOO_LONG);
    assert!(ctx.conversation(NEW_USER).await.unwrap().is_at(flows::REGISTRATION, steps::NAME_INPUT));

    ctx.text(NEW_USER, "Мария").await;
    assert_eq!(ctx.messenger.last_text_to(NEW_USER).unwrap(), texts::ASK_PHONE);
}
