//! Keyboard layouts used by the conversation flows

use chrono::NaiveTime;
use crate::messenger::{InlineButton, Markup, ReplyButton};
use crate::models::{Appointment, Service};
use crate::services::{CalendarCell, CalendarMonth};
use crate::texts;
use crate::utils::helpers::{format_time, DATE_FORMAT};

pub const CALLBACK_IGNORE: &str = "cal:ignore";

/// Telegram rejects a keyboard if any button carries more callback data
pub const CALLBACK_DATA_LIMIT: usize = 64;

fn reply_rows(rows: &[&[&str]]) -> Vec<Vec<ReplyButton>> {
    rows.iter()
        .map(|row| row.iter().map(|text| ReplyButton::Text(text.to_string())).collect())
        .collect()
}

pub fn main_menu() -> Markup {
    Markup::Reply {
        rows: reply_rows(&[
            &[texts::BTN_BOOK],
            &[texts::BTN_MY_BOOKINGS, texts::BTN_CANCEL_BOOKING],
            &[texts::BTN_MASTER_MODE],
        ]),
        one_time: false,
    }
}

pub fn master_menu() -> Markup {
    Markup::Reply {
        rows: reply_rows(&[
            &[texts::BTN_MASTER_TODAY, texts::BTN_MASTER_TOMORROW],
            &[texts::BTN_MASTER_ALL, texts::BTN_MASTER_STATS],
            &[texts::BTN_MASTER_BACK],
        ]),
        one_time: false,
    }
}

/// Contact request plus manual entry, hidden after one use
pub fn phone_choice() -> Markup {
    Markup::Reply {
        rows: vec![
            vec![ReplyButton::RequestContact(texts::BTN_SHARE_CONTACT.to_string())],
            vec![ReplyButton::Text(texts::BTN_MANUAL_PHONE.to_string())],
        ],
        one_time: true,
    }
}

/// Buttons carry the position in the list, names may be longer than callback data allows
pub fn services(services: &[Service]) -> Markup {
    Markup::Inline(
        services
            .iter()
            .enumerate()
            .map(|(position, service)| vec![InlineButton::new(service.display_label(), format!("service:{}", position))])
            .collect(),
    )
}

/// Month grid: navigation header, weekday names, then one row per week
pub fn calendar(month: &CalendarMonth) -> Markup {
    let previous = if month.offset > 0 {
        format!("cal:nav:{}", month.offset - 1)
    } else {
        CALLBACK_IGNORE.to_string()
    };

    let mut rows = vec![
        vec![
            InlineButton::new(texts::BTN_PREV_MONTH, previous),
            InlineButton::new(month.title(), CALLBACK_IGNORE),
            InlineButton::new(texts::BTN_NEXT_MONTH, format!("cal:nav:{}", month.offset + 1)),
        ],
        texts::WEEKDAYS
            .iter()
            .map(|day| InlineButton::new(*day, CALLBACK_IGNORE))
            .collect(),
    ];

    for week in &month.weeks {
        rows.push(
            week.iter()
                .map(|cell| match cell {
                    CalendarCell::Selectable(date) => InlineButton::new(
                        date.format("%-d").to_string(),
                        format!("cal:day:{}", date.format(DATE_FORMAT)),
                    ),
                    CalendarCell::Empty | CalendarCell::Past(_) => InlineButton::new(" ", CALLBACK_IGNORE),
                })
                .collect(),
        );
    }

    Markup::Inline(rows)
}

pub fn times(slots: &[NaiveTime]) -> Markup {
    Markup::Inline(
        slots
            .iter()
            .map(|slot| {
                let label = format_time(*slot);
                vec![InlineButton::new(label.clone(), format!("time:{}", label))]
            })
            .collect(),
    )
}

pub fn confirmation() -> Markup {
    Markup::Inline(vec![vec![
        InlineButton::new(texts::BTN_CONFIRM, "confirm:yes"),
        InlineButton::new(texts::BTN_DECLINE, "confirm:no"),
    ]])
}

/// One button per appointment that carries an id; numbering follows the full list
pub fn cancellable(appointments: &[Appointment]) -> Markup {
    Markup::Inline(
        appointments
            .iter()
            .enumerate()
            .filter_map(|(index, appointment)| {
                let id = appointment.id.as_ref()?;
                Some(vec![InlineButton::new(
                    texts::cancel_button_label(index + 1, appointment),
                    format!("cancel:{}", id),
                )])
            })
            .collect(),
    )
}
