//! Russian user-facing texts
//!
//! Every message the bot sends lives here, so flows and services only
//! decide *which* text to send.

use chrono::{NaiveDate, NaiveTime};
use crate::models::Appointment;
use crate::utils::helpers::{format_date, format_short_date, format_time, short_id, truncate_text};

/// Cancellation buttons stay one line wide, the appointment id travels in callback data
const CANCEL_LABEL_MAX_CHARS: usize = 40;

pub const BTN_BOOK: &str = "💅 Записаться на услугу";
pub const BTN_MY_BOOKINGS: &str = "📋 Мои записи";
pub const BTN_CANCEL_BOOKING: &str = "❌ Отменить запись";
pub const BTN_MASTER_MODE: &str = "👨‍💼 Режим мастера";

pub const BTN_SHARE_CONTACT: &str = "📱 Отправить мой номер";
pub const BTN_MANUAL_PHONE: &str = "Ввести номер вручную";

pub const BTN_MASTER_TODAY: &str = "📊 Записи на сегодня";
pub const BTN_MASTER_TOMORROW: &str = "📅 Записи на завтра";
pub const BTN_MASTER_ALL: &str = "🗓️ Все активные записи";
pub const BTN_MASTER_STATS: &str = "📈 Статистика";
pub const BTN_MASTER_BACK: &str = "🔙 Главное меню";

pub const BTN_CONFIRM: &str = "✅ Подтвердить";
pub const BTN_DECLINE: &str = "❌ Отменить";
pub const BTN_PREV_MONTH: &str = "←";
pub const BTN_NEXT_MONTH: &str = "→";
pub const WEEKDAYS: [&str; 7] = ["Пн", "Вт", "Ср", "Чт", "Пт", "Сб", "Вс"];

pub const MAIN_MENU_PROMPT: &str = "Выберите действие:";
pub const GENERIC_ERROR: &str = "Произошла ошибка. Пожалуйста, попробуйте позже.";
pub const ACCESS_DENIED: &str = "У вас нет доступа к этой функции.";
pub const REGISTER_FIRST: &str = "Сначала нужно завершить регистрацию. Напишите /start";
pub const FLOW_ABORTED: &str = "Действие отменено.";
pub const SESSION_EXPIRED: &str = "Сессия истекла. Начните заново из меню.";
pub const UNKNOWN_INPUT: &str = "Не понимаю. Выберите действие в меню или напишите /help.";

pub const NAME_TOO_LONG: &str = "Слишком длинное имя. Введите не больше 100 символов:";
pub const ASK_PHONE: &str = "Отлично! Теперь нужен твой номер телефона для связи и напоминаний.";
pub const ASK_PHONE_MANUAL: &str = "Введи свой номер телефона в формате:\n+7XXXYYYZZWW или 8XXXYYYZZWW";
pub const INVALID_PHONE: &str = "Пожалуйста, введите корректный номер телефона:";

pub const CHOOSE_SERVICE: &str = "Выберите услугу:";
pub const CHOOSE_DATE: &str = "Выберите дату:";
pub const SLOT_TAKEN: &str = "Это время уже заняли. Выберите другое время.";
pub const BOOKING_CONFIRMED: &str =
    "✅ Запись подтверждена!\n\nМы ждем вас в салоне! За день до визита пришлем напоминание.";
pub const BOOKING_DECLINED: &str = "Запись отменена.";

pub const NO_ACTIVE_BOOKINGS: &str = "У вас нет активных записей.";
pub const NO_BOOKINGS_TO_CANCEL: &str = "У вас нет активных записей для отмены.";
pub const CHOOSE_BOOKING_TO_CANCEL: &str = "Выберите запись для отмены:";
pub const BOOKING_CANCELLED: &str = "✅ Запись отменена.";

pub const MASTER_MENU_TITLE: &str = "👨‍💼 Режим мастера:";
pub const NO_ACTIVE_APPOINTMENTS: &str = "Активных записей нет.";

pub const HELP: &str = "💅 Бот записи в салон красоты\n\n\
/start - регистрация или главное меню\n\
/book - записаться на услугу\n\
/bookings - мои записи\n\
/master - режим мастера\n\
/cancel - прервать текущее действие\n\
/help - эта справка";

pub fn greeting(first_name: &str) -> String {
    format!(
        "👋 Привет, {}!\nЯ - бот салона красоты 'Ваш Мастер'!\nДля начала давай познакомимся.\n\n\
         Как тебя зовут? (Укажи имя, которое будет в записи)",
        first_name
    )
}

pub fn registration_complete(name: &str, phone: &str) -> String {
    format!(
        "✅ Регистрация завершена!\n\nИмя: {}\nТелефон: {}\n\nТеперь ты можешь записываться на услуги!",
        name, phone
    )
}

pub fn no_free_slots(date: NaiveDate) -> String {
    format!("На {} нет свободных слотов. Выберите другую дату.", format_date(date))
}

pub fn choose_time(date: NaiveDate) -> String {
    format!("Выберите время на {}:", format_date(date))
}

pub fn booking_summary(client_name: &str, phone: &str, service: &str, date: NaiveDate, time: NaiveTime) -> String {
    format!(
        "📋 Подтвердите запись:\n\n👤 Клиент: {}\n📞 Телефон: {}\n💅 Услуга: {}\n📅 Дата: {}\n⏰ Время: {}",
        client_name,
        phone,
        service,
        format_date(date),
        format_time(time)
    )
}

pub fn my_bookings(appointments: &[Appointment]) -> String {
    let mut message = String::from("📋 Ваши активные записи:\n\n");
    for (index, appointment) in appointments.iter().enumerate() {
        message.push_str(&format!(
            "{}. 💅 {}\n   📅 {}\n   ⏰ {}\n",
            index + 1,
            appointment.service_name,
            format_date(appointment.date),
            format_time(appointment.time)
        ));
        if let Some(id) = &appointment.id {
            message.push_str(&format!("   ID: {}\n", short_id(id)));
        }
        message.push('\n');
    }
    message
}

/// Label of a cancellation button, e.g. "1. 20.10 14:00 - Маникюр"
pub fn cancel_button_label(position: usize, appointment: &Appointment) -> String {
    let label = format!(
        "{}. {} {} - {}",
        position,
        format_short_date(appointment.date),
        format_time(appointment.time),
        appointment.service_name
    );
    truncate_text(&label, CANCEL_LABEL_MAX_CHARS)
}

pub fn day_listing(day_label: &str, appointments: &[Appointment]) -> String {
    if appointments.is_empty() {
        return format!("На {} записей нет.", day_label);
    }

    let mut message = format!("📋 Записи на {}:\n\n", day_label);
    for (index, appointment) in appointments.iter().enumerate() {
        message.push_str(&format!(
            "{}. ⏰ {}\n   👤 {}\n   📞 {}\n   💅 {}\n\n",
            index + 1,
            format_time(appointment.time),
            appointment.client_name,
            appointment.phone,
            appointment.service_name
        ));
    }
    message
}

fn appointment_line(appointment: &Appointment) -> String {
    format!(
        "⏰ {} - {} ({}) - {}",
        format_time(appointment.time),
        appointment.client_name,
        appointment.phone,
        appointment.service_name
    )
}

pub fn all_active_listing<'a>(days: impl IntoIterator<Item = (&'a NaiveDate, &'a Vec<Appointment>)>) -> String {
    let mut message = String::from("🗓️ Все активные записи:\n\n");
    let mut any = false;
    for (date, appointments) in days {
        any = true;
        message.push_str(&format!("📅 {}:\n", format_date(*date)));
        for appointment in appointments {
            message.push_str(&format!("   {}\n", appointment_line(appointment)));
        }
        message.push('\n');
    }

    if any {
        message
    } else {
        NO_ACTIVE_APPOINTMENTS.to_string()
    }
}

pub fn statistics(
    clients: usize,
    total: usize,
    confirmed: usize,
    cancelled: usize,
    upcoming: usize,
    top_service: Option<(&str, usize)>,
) -> String {
    let mut message = format!(
        "📈 Статистика салона:\n\n👥 Клиентов: {}\n📋 Всего записей: {}\n✅ Подтверждено: {}\n❌ Отменено: {}\n🗓️ Предстоящих: {}",
        clients, total, confirmed, cancelled, upcoming
    );
    if let Some((service, count)) = top_service {
        message.push_str(&format!("\n💅 Популярная услуга: {} ({})", service, count));
    }
    message
}

pub fn master_new_booking(appointment: &Appointment) -> String {
    format!(
        "📥 Новая запись!\nКлиент: {}\nТелефон: {}\nУслуга: {}\nДата: {}\nВремя: {}",
        appointment.client_name,
        appointment.phone,
        appointment.service_name,
        format_date(appointment.date),
        format_time(appointment.time)
    )
}

pub fn master_cancellation(appointment: &Appointment) -> String {
    format!(
        "❌ Отмена записи!\nКлиент: {}\nТелефон: {}\nУслуга: {}\nДата: {}\nВремя: {}",
        appointment.client_name,
        appointment.phone,
        appointment.service_name,
        format_date(appointment.date),
        format_time(appointment.time)
    )
}

pub fn client_reminder(appointment: &Appointment) -> String {
    format!(
        "🔔 Напоминание о записи!\n\nЗавтра, {} в {}\nУ вас запись на: {}\n\nЖдем вас в салоне! 🎉",
        format_date(appointment.date),
        format_time(appointment.time),
        appointment.service_name
    )
}

pub fn master_daily_summary(date: NaiveDate, appointments: &[Appointment]) -> String {
    let mut message = format!("📋 Записи на завтра ({}):\n\n", format_date(date));
    for (index, appointment) in appointments.iter().enumerate() {
        message.push_str(&format!("{}. {}\n", index + 1, appointment_line(appointment)));
    }
    message
}
