use chrono::Utc;
use serde::Serialize;
use std::fmt::Write;
use studyhall_core::{
    api::{CafeApi, CheckInRequest, CheckOutRequest, PurchaseRequest},
    booking::{BookingDraft, BookingStep, SeatRejection},
    seat::{Seat, SeatKind, SeatStatus},
    ticket::{Ticket, TicketKind},
    validate,
};
use studyhall_tui::components::ticket_list::format_price;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug, Clone)]
pub struct CliError {
    message: String,
    code: i32,
}

impl CliError {
    pub fn user(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: 1,
        }
    }

    pub fn system(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: 2,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn code(&self) -> i32 {
        self.code
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

impl From<anyhow::Error> for CliError {
    fn from(value: anyhow::Error) -> Self {
        Self::system(value.to_string())
    }
}

#[derive(Debug, Clone)]
pub struct CheckInArgs {
    pub phone: String,
    pub seat: u32,
    pub order: Option<u32>,
    pub json: bool,
}

#[derive(Debug, Clone)]
pub struct CheckOutArgs {
    pub seat: u32,
    pub phone: Option<String>,
    pub pin: Option<String>,
    pub json: bool,
}

#[derive(Debug, Clone)]
pub struct PurchaseArgs {
    pub product: u32,
    pub phone: Option<String>,
    pub member: Option<u32>,
    pub json: bool,
}

#[derive(Debug, Clone)]
pub struct BookArgs {
    pub product: u32,
    pub seat: Option<u32>,
    pub point: u32,
    pub json: bool,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
struct SeatOutput {
    seat_id: u32,
    kind: &'static str,
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    occupant: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    remaining_minutes: Option<i64>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
struct TicketOutput {
    product_id: u32,
    name: String,
    price: u32,
    kind: &'static str,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
struct CheckInOutput {
    seat_id: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    expires_at: Option<chrono::DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
struct CheckOutOutput {
    seat_id: u32,
    time_used_minutes: u32,
    remaining_time_minutes: u32,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
struct PurchaseOutput {
    product_name: String,
    price: u32,
    order_id: u32,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
struct BookOutput {
    product_id: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    seat_id: Option<u32>,
    point_used: u32,
    payment_amount: u32,
    order_id: u32,
}

fn seat_output(seat: &Seat) -> SeatOutput {
    let kind = match seat.kind {
        SeatKind::Free => "free",
        SeatKind::Fixed => "fix",
    };
    match &seat.status {
        SeatStatus::Available => SeatOutput {
            seat_id: seat.seat_id,
            kind,
            status: "available",
            occupant: None,
            remaining_minutes: None,
        },
        SeatStatus::Occupied { user_name, .. } => SeatOutput {
            seat_id: seat.seat_id,
            kind,
            status: "occupied",
            occupant: Some(masked(user_name)),
            remaining_minutes: Some(seat.remaining_seconds(Utc::now()) / 60),
        },
        SeatStatus::Maintenance => SeatOutput {
            seat_id: seat.seat_id,
            kind,
            status: "maintenance",
            occupant: None,
            remaining_minutes: None,
        },
    }
}

/// Occupant names are masked past the first character, as on the kiosk
/// floor display.
fn masked(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => {
            let rest = chars.count();
            format!("{first}{}", "*".repeat(rest))
        }
        None => String::new(),
    }
}

pub fn cmd_seats(api: &dyn CafeApi, json: bool) -> CliResult<()> {
    let seats = api.kiosk_seats()?;
    let output: Vec<SeatOutput> = seats.iter().map(seat_output).collect();

    if json {
        print_json(&output)?;
    } else {
        print!("{}", format_seat_table(&output));
    }

    Ok(())
}

pub fn cmd_tickets(api: &dyn CafeApi, json: bool) -> CliResult<()> {
    let tickets = api.tickets()?;
    let output: Vec<TicketOutput> = tickets
        .into_iter()
        .map(|ticket| TicketOutput {
            product_id: ticket.product_id,
            name: ticket.name,
            price: ticket.price,
            kind: kind_label(ticket.kind),
        })
        .collect();

    if json {
        print_json(&output)?;
    } else {
        print!("{}", format_ticket_table(&output));
    }

    Ok(())
}

fn kind_label(kind: TicketKind) -> &'static str {
    match kind {
        TicketKind::Time => "time",
        TicketKind::Period => "period",
    }
}

pub fn cmd_check_in(api: &dyn CafeApi, args: &CheckInArgs) -> CliResult<()> {
    if !validate::is_valid_phone(&args.phone) {
        return Err(CliError::user(
            "phone must look like 010-XXXX-XXXX".to_string(),
        ));
    }

    let receipt = api.check_in(&CheckInRequest {
        phone: args.phone.clone(),
        seat_id: args.seat,
        order_id: args.order,
    })?;

    let output = CheckInOutput {
        seat_id: receipt.seat_id,
        expires_at: receipt.ticket_expired_time,
    };
    if args.json {
        print_json(&output)?;
    } else {
        match output.expires_at {
            Some(expires_at) => println!(
                "Checked in at seat {} (until {})",
                output.seat_id,
                expires_at.format("%H:%M")
            ),
            None => println!("Checked in at seat {}", output.seat_id),
        }
    }

    Ok(())
}

pub fn cmd_check_out(api: &dyn CafeApi, args: &CheckOutArgs) -> CliResult<()> {
    match (&args.phone, &args.pin) {
        (Some(_), Some(_)) | (None, None) => {
            return Err(CliError::user(
                "pass exactly one of --phone (guest) or --pin (member)",
            ));
        }
        (Some(phone), None) if !validate::is_valid_phone(phone) => {
            return Err(CliError::user(
                "phone must look like 010-XXXX-XXXX".to_string(),
            ));
        }
        (None, Some(pin)) if !validate::is_valid_pin(pin) => {
            return Err(CliError::user("PIN must be four digits".to_string()));
        }
        _ => {}
    }

    let receipt = api.check_out(&CheckOutRequest {
        seat_id: args.seat,
        phone: args.phone.clone(),
        pin: args.pin.clone(),
    })?;

    let output = CheckOutOutput {
        seat_id: args.seat,
        time_used_minutes: receipt.time_used_minutes,
        remaining_time_minutes: receipt.remaining_time_minutes,
    };
    if args.json {
        print_json(&output)?;
    } else {
        println!(
            "Checked out of seat {} after {} min ({} min banked)",
            output.seat_id, output.time_used_minutes, output.remaining_time_minutes
        );
    }

    Ok(())
}

pub fn cmd_purchase(api: &dyn CafeApi, args: &PurchaseArgs) -> CliResult<()> {
    if args.phone.is_none() && args.member.is_none() {
        return Err(CliError::user(
            "pass --phone (guest) or --member (member id)",
        ));
    }
    if let Some(phone) = &args.phone
        && !validate::is_valid_phone(phone)
    {
        return Err(CliError::user(
            "phone must look like 010-XXXX-XXXX".to_string(),
        ));
    }

    let result = api.purchase(&PurchaseRequest {
        product_id: args.product,
        phone: args.phone.clone(),
        member_id: args.member,
    })?;

    let output = PurchaseOutput {
        product_name: result.product_name,
        price: result.price,
        order_id: result.order_id,
    };
    if args.json {
        print_json(&output)?;
    } else {
        println!(
            "Paid {} won for {} (order {})",
            format_price(output.price),
            output.product_name,
            output.order_id
        );
    }

    Ok(())
}

pub fn cmd_book(api: &dyn CafeApi, args: &BookArgs) -> CliResult<()> {
    let output = run_booking(api, args)?;

    if args.json {
        print_json(&output)?;
    } else {
        match output.seat_id {
            Some(seat_id) => println!(
                "Booked seat {seat_id}: paid {} won (order {})",
                format_price(output.payment_amount),
                output.order_id
            ),
            None => println!(
                "Booked: paid {} won (order {})",
                format_price(output.payment_amount),
                output.order_id
            ),
        }
    }

    Ok(())
}

/// Drive a whole web booking through the draft state machine. Each CLI
/// flag stands in for one wizard step.
fn run_booking(api: &dyn CafeApi, args: &BookArgs) -> CliResult<BookOutput> {
    let tickets = api.tickets()?;
    let ticket = resolve_ticket(&tickets, args.product)?.clone();

    let mut draft = BookingDraft::new(format!("cli-{}", Utc::now().timestamp_millis()));
    draft.select_ticket(ticket);

    if draft.step() == BookingStep::SeatSelect {
        let Some(seat_id) = args.seat else {
            return Err(CliError::user(
                "a period pass needs a fixed seat: pass --seat",
            ));
        };
        let seats = api.web_seats()?;
        let seat = seats
            .iter()
            .find(|seat| seat.seat_id == seat_id)
            .ok_or_else(|| CliError::user(format!("no seat with id {seat_id}")))?;
        draft.select_seat(seat).map_err(|rejection| {
            CliError::user(match rejection {
                SeatRejection::NotFixed => format!("seat {seat_id} is not a fixed desk"),
                SeatRejection::NotAvailable => format!("seat {seat_id} is taken"),
            })
        })?;
    } else if args.seat.is_some() {
        return Err(CliError::user("--seat only applies to period passes"));
    }

    let profile = api.me()?;
    draft.set_profile(profile);
    draft
        .apply_point(args.point)
        .map_err(|e| CliError::user(format!("at most {} mileage can be used here", e.limit)))?;

    let request = draft
        .payment_request()
        .ok_or_else(|| CliError::system("booking draft incomplete after all steps"))?;
    let receipt = api.submit_payment(&request)?;
    draft.complete(receipt.order_id);

    Ok(BookOutput {
        product_id: request.product_id,
        seat_id: request.seat_id,
        point_used: request.point_used,
        payment_amount: receipt.payment_amount,
        order_id: receipt.order_id,
    })
}

fn resolve_ticket(tickets: &[Ticket], product_id: u32) -> CliResult<&Ticket> {
    tickets
        .iter()
        .find(|ticket| ticket.product_id == product_id)
        .ok_or_else(|| {
            let available = tickets
                .iter()
                .map(|ticket| ticket.product_id.to_string())
                .collect::<Vec<_>>()
                .join(", ");

            if available.is_empty() {
                CliError::user(format!("no ticket with id {product_id}. Available: (none)"))
            } else {
                CliError::user(format!(
                    "no ticket with id {product_id}. Available: {available}"
                ))
            }
        })
}

fn format_seat_table(seats: &[SeatOutput]) -> String {
    let headers = ["seat", "kind", "status", "occupant", "left(min)"];
    let rows: Vec<[String; 5]> = seats
        .iter()
        .map(|seat| {
            [
                seat.seat_id.to_string(),
                seat.kind.to_string(),
                seat.status.to_string(),
                seat.occupant.clone().unwrap_or_default(),
                seat.remaining_minutes
                    .map(|m| m.to_string())
                    .unwrap_or_default(),
            ]
        })
        .collect();

    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(col, header)| {
            rows.iter()
                .map(|row| row[col].len())
                .max()
                .unwrap_or(header.len())
                .max(header.len())
        })
        .collect();

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<w0$}  {:<w1$}  {:<w2$}  {:<w3$}  {}",
        headers[0],
        headers[1],
        headers[2],
        headers[3],
        headers[4],
        w0 = widths[0],
        w1 = widths[1],
        w2 = widths[2],
        w3 = widths[3],
    );
    for row in &rows {
        let _ = writeln!(
            out,
            "{:<w0$}  {:<w1$}  {:<w2$}  {:<w3$}  {}",
            row[0],
            row[1],
            row[2],
            row[3],
            row[4],
            w0 = widths[0],
            w1 = widths[1],
            w2 = widths[2],
            w3 = widths[3],
        );
    }
    out
}

fn format_ticket_table(tickets: &[TicketOutput]) -> String {
    let id_header = "id";
    let name_header = "name";
    let kind_header = "kind";
    let price_header = "price";

    let id_width = tickets
        .iter()
        .map(|t| t.product_id.to_string().len())
        .max()
        .unwrap_or(id_header.len())
        .max(id_header.len());
    let name_width = tickets
        .iter()
        .map(|t| t.name.chars().count())
        .max()
        .unwrap_or(name_header.len())
        .max(name_header.len());
    let kind_width = tickets
        .iter()
        .map(|t| t.kind.len())
        .max()
        .unwrap_or(kind_header.len())
        .max(kind_header.len());

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{id_header:<id_width$}  {name_header:<name_width$}  {kind_header:<kind_width$}  {price_header}"
    );
    for ticket in tickets {
        // Pad by char count so Hangul names keep columns aligned.
        let pad = name_width - ticket.name.chars().count();
        let _ = writeln!(
            out,
            "{:<id_width$}  {}{}  {:<kind_width$}  {}",
            ticket.product_id,
            ticket.name,
            " ".repeat(pad),
            ticket.kind,
            format_price(ticket.price),
        );
    }
    out
}

fn print_json<T: Serialize>(value: &T) -> CliResult<()> {
    println!(
        "{}",
        serde_json::to_string(value).map_err(|e| CliError::system(e.to_string()))?
    );
    Ok(())
}

pub fn print_error(error: &CliError, json: bool) {
    if json {
        let payload = serde_json::json!({ "error": error.message() });
        eprintln!("{payload}");
    } else {
        eprintln!("{}", error.message());
    }
}
