use std::{sync::Arc, thread};

use studyhall_core::{
    api::{CafeApi, CheckInRequest, CheckOutRequest, PurchaseRequest},
    event::{AppEvent, EventSender},
};

pub(super) fn spawn_seat_fetch(api: &Arc<dyn CafeApi>, sender: &EventSender) {
    let api = Arc::clone(api);
    let sender = sender.clone();
    thread::spawn(move || {
        if sender.is_cancelled() {
            return;
        }
        match api.kiosk_seats() {
            Ok(seats) => sender.send(AppEvent::SeatsLoaded(seats)),
            Err(e) => sender.send(AppEvent::SeatsLoadFailed(e.to_string())),
        }
    });
}

pub(super) fn spawn_ticket_fetch(api: &Arc<dyn CafeApi>, sender: &EventSender) {
    let api = Arc::clone(api);
    let sender = sender.clone();
    thread::spawn(move || {
        if sender.is_cancelled() {
            return;
        }
        match api.tickets() {
            Ok(tickets) => sender.send(AppEvent::TicketsLoaded(tickets)),
            Err(e) => sender.send(AppEvent::TicketsLoadFailed(e.to_string())),
        }
    });
}

pub(super) fn spawn_login(
    api: &Arc<dyn CafeApi>,
    sender: &EventSender,
    phone: String,
    pin: String,
) {
    let api = Arc::clone(api);
    let sender = sender.clone();
    thread::spawn(move || {
        if sender.is_cancelled() {
            return;
        }
        match api.member_login(&phone, &pin) {
            Ok(member) => sender.send(AppEvent::LoginSucceeded(member)),
            Err(e) => sender.send(AppEvent::LoginFailed(e.to_string())),
        }
    });
}

pub(super) fn spawn_purchase(
    api: &Arc<dyn CafeApi>,
    sender: &EventSender,
    request: PurchaseRequest,
) {
    let api = Arc::clone(api);
    let sender = sender.clone();
    thread::spawn(move || {
        if sender.is_cancelled() {
            return;
        }
        match api.purchase(&request) {
            Ok(result) => sender.send(AppEvent::PurchaseCompleted(result)),
            Err(e) => sender.send(AppEvent::PurchaseFailed(e.to_string())),
        }
    });
}

pub(super) fn spawn_check_in(
    api: &Arc<dyn CafeApi>,
    sender: &EventSender,
    request: CheckInRequest,
) {
    let api = Arc::clone(api);
    let sender = sender.clone();
    thread::spawn(move || {
        if sender.is_cancelled() {
            return;
        }
        match api.check_in(&request) {
            Ok(receipt) => sender.send(AppEvent::CheckInCompleted(receipt)),
            Err(e) => sender.send(AppEvent::CheckInFailed(e.to_string())),
        }
    });
}

pub(super) fn spawn_check_out(
    api: &Arc<dyn CafeApi>,
    sender: &EventSender,
    request: CheckOutRequest,
) {
    let api = Arc::clone(api);
    let sender = sender.clone();
    thread::spawn(move || {
        if sender.is_cancelled() {
            return;
        }
        match api.check_out(&request) {
            Ok(receipt) => sender.send(AppEvent::CheckOutCompleted(receipt)),
            Err(e) => sender.send(AppEvent::CheckOutFailed(e.to_string())),
        }
    });
}
