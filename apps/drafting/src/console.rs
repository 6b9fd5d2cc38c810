//! # Operator Console
//!
//! Line-oriented front end over the drafting commands. Each input line is
//! parsed with clap and dispatched to one command; every reply is JSON.
//!
//! ## Console Lines
//! ```text
//!  service [id]                      list services / select one
//!  set <field> [value]               numeric field, raw text ("" clears)
//!  date <YYYY-MM-DD>                 invoice date
//!  booking [--id] [--gds] [--airline] booking references
//!  ticket [--number] [--airline] [--passenger]
//!  flight <one-way|round-trip|multi-city>
//!  leg <1|2> <from> <to> [date]
//!  customer <text...>                search customers, wait for results
//!  vendor <text...>                  search vendors, wait for results
//!  pick <customer|vendor> <id>       put a search hit onto the draft
//!  show                              snapshot + formatted totals
//!  check                             submission preconditions
//!  reset                             start a fresh draft
//!  quit
//! ```
//!
//! Double quotes group words: `ticket --passenger "Jane Doe"`.

use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use serde_json::Value;

use tripdesk_core::{BookingRefs, DerivedTotals, EntityKind, InvoiceSnapshot, TicketInfo};

use crate::commands::{catalog, draft, search};
use crate::error::ApiError;
use crate::state::ConfigState;
use crate::DraftingSession;

// =============================================================================
// Line Grammar
// =============================================================================

/// One console line.
#[derive(Debug, Parser)]
#[command(name = "console", no_binary_name = true, disable_version_flag = true)]
pub struct ConsoleLine {
    #[command(subcommand)]
    pub command: ConsoleCommand,
}

/// Which search field a line addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SearchField {
    Customer,
    Vendor,
}

impl From<SearchField> for EntityKind {
    fn from(field: SearchField) -> Self {
        match field {
            SearchField::Customer => EntityKind::Customer,
            SearchField::Vendor => EntityKind::Vendor,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum ConsoleCommand {
    /// List services, or select one by id
    Service { id: Option<String> },

    /// Set a numeric field to raw text
    Set {
        /// Field name, e.g. customer-base-fare
        field: String,
        #[arg(default_value = "", allow_hyphen_values = true)]
        value: String,
    },

    /// Set the invoice date
    Date { date: String },

    /// Set booking references
    Booking {
        #[arg(long, default_value = "")]
        id: String,
        #[arg(long, default_value = "")]
        gds: String,
        #[arg(long, default_value = "")]
        airline: String,
    },

    /// Set ticket metadata
    Ticket {
        #[arg(long, default_value = "")]
        number: String,
        #[arg(long, default_value = "")]
        airline: String,
        #[arg(long, default_value = "")]
        passenger: String,
    },

    /// Switch the flight plan variant
    Flight { kind: String },

    /// Set a flight leg (1 = first, 2 = return/second segment)
    Leg {
        #[arg(value_parser = clap::value_parser!(u8).range(1..=2))]
        number: u8,
        origin: String,
        destination: String,
        date: Option<String>,
    },

    /// Search customers
    Customer {
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        query: Vec<String>,
    },

    /// Search vendors
    Vendor {
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        query: Vec<String>,
    },

    /// Put a search hit onto the draft
    Pick {
        #[arg(value_enum)]
        field: SearchField,
        id: String,
    },

    /// Show the draft and its totals
    Show,

    /// Check submission preconditions
    Check,

    /// Discard the draft and start over
    Reset,

    /// Leave the console
    Quit,
}

/// Splits a line into words, keeping double-quoted runs together.
pub fn split_line(line: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut quoted = false;
    let mut pending = false;

    for c in line.chars() {
        match c {
            '"' => {
                quoted = !quoted;
                pending = true;
            }
            c if c.is_whitespace() && !quoted => {
                if pending {
                    words.push(std::mem::take(&mut current));
                    pending = false;
                }
            }
            c => {
                current.push(c);
                pending = true;
            }
        }
    }
    if pending {
        words.push(current);
    }

    words
}

// =============================================================================
// Replies
// =============================================================================

/// What the console prints for one line.
#[derive(Debug)]
pub enum Reply {
    Json(Value),
    Text(String),
    Empty,
    Quit,
}

/// Derived totals formatted in the session currency.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormattedTotals {
    pub bill: String,
    pub amount: String,
    pub due: String,
    pub customer_total_fare: String,
    pub vendor_total_fare: String,
}

impl FormattedTotals {
    pub fn new(config: &ConfigState, totals: &DerivedTotals) -> Self {
        FormattedTotals {
            bill: config.format_money(totals.computed_bill),
            amount: config.format_money(totals.amount),
            due: config.format_money(totals.due),
            customer_total_fare: config.format_money(totals.customer_total_fare),
            vendor_total_fare: config.format_money(totals.vendor_total_fare),
        }
    }
}

/// `show` output.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftView {
    pub snapshot: InvoiceSnapshot,
    pub formatted: FormattedTotals,
}

fn json<T: Serialize>(value: &T) -> Result<Reply, ApiError> {
    serde_json::to_value(value)
        .map(Reply::Json)
        .map_err(|e| ApiError::internal(e.to_string()))
}

fn error_reply(err: &ApiError) -> Reply {
    Reply::Json(serde_json::json!({ "error": err }))
}

// =============================================================================
// Dispatch
// =============================================================================

/// Parses and executes one console line.
pub async fn execute(session: &DraftingSession, line: &str) -> Reply {
    let words = split_line(line);
    if words.is_empty() {
        return Reply::Empty;
    }

    let parsed = match ConsoleLine::try_parse_from(words) {
        Ok(parsed) => parsed,
        Err(e) => return Reply::Text(e.render().to_string()),
    };

    match dispatch(session, parsed.command).await {
        Ok(reply) => reply,
        Err(e) => error_reply(&e),
    }
}

async fn dispatch(session: &DraftingSession, command: ConsoleCommand) -> Result<Reply, ApiError> {
    let DraftingSession {
        draft: draft_state,
        catalog: catalog_state,
        search: search_state,
        ..
    } = session;

    match command {
        ConsoleCommand::Service { id: None } => {
            json(&catalog::list_services(catalog_state, draft_state))
        }
        ConsoleCommand::Service { id: Some(id) } => {
            json(&catalog::select_service(catalog_state, draft_state, &id)?)
        }
        ConsoleCommand::Set { field, value } => json(&draft::set_draft_field(
            catalog_state,
            draft_state,
            &field,
            &value,
        )?),
        ConsoleCommand::Date { date } => {
            json(&draft::set_invoice_date(catalog_state, draft_state, &date)?)
        }
        ConsoleCommand::Booking { id, gds, airline } => json(&draft::set_booking_refs(
            catalog_state,
            draft_state,
            BookingRefs {
                booking_id: id,
                gds_pnr: gds,
                airline_pnr: airline,
            },
        )?),
        ConsoleCommand::Ticket {
            number,
            airline,
            passenger,
        } => json(&draft::set_ticket_info(
            catalog_state,
            draft_state,
            TicketInfo {
                ticket_number: number,
                airline,
                passenger_name: passenger,
            },
        )?),
        ConsoleCommand::Flight { kind } => {
            json(&draft::set_flight_kind(catalog_state, draft_state, &kind)?)
        }
        ConsoleCommand::Leg {
            number,
            origin,
            destination,
            date,
        } => json(&draft::set_flight_leg(
            catalog_state,
            draft_state,
            usize::from(number - 1),
            &origin,
            &destination,
            date.as_deref(),
        )?),
        ConsoleCommand::Customer { query } => {
            run_search(session, EntityKind::Customer, &query.join(" ")).await
        }
        ConsoleCommand::Vendor { query } => {
            run_search(session, EntityKind::Vendor, &query.join(" ")).await
        }
        ConsoleCommand::Pick { field, id } => json(
            &search::select_candidate(catalog_state, draft_state, search_state, field.into(), &id)
                .await?,
        ),
        ConsoleCommand::Show => {
            let snapshot = draft::get_draft_snapshot(catalog_state, draft_state);
            let formatted = FormattedTotals::new(&session.config, &snapshot.totals);
            json(&DraftView {
                snapshot,
                formatted,
            })
        }
        ConsoleCommand::Check => {
            let snapshot = draft::check_submission(catalog_state, draft_state)?;
            json(&serde_json::json!({ "ready": true, "snapshot": snapshot }))
        }
        ConsoleCommand::Reset => {
            json(&draft::reset_draft(catalog_state, draft_state, search_state).await?)
        }
        ConsoleCommand::Quit => Ok(Reply::Quit),
    }
}

async fn run_search(session: &DraftingSession, kind: EntityKind, query: &str) -> Result<Reply, ApiError> {
    let generation = search::search_entities(&session.search, kind, query).await?;
    let snapshot =
        search::await_search_results(&session.search, kind, generation, session.search_wait())
            .await?;
    json(&snapshot)
}
