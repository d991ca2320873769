use crate::availability::DayAvailability;
use crate::booking::{BookingRequest, LessonType};
use crate::day::DayOfWeek;
use crate::hours::WorkingHours;
use crate::store::{BookingFilter, Store};
use crate::time::Time;
use crate::waitlist::{PreferredTime, WaitlistRequest, WaitlistStatus};
use clap::Parser;
use colored::Colorize;
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::{Context, Editor, Helper, Highlighter, Hinter, Validator};
use std::error::Error;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::sync::Arc;
use tabled::settings::Style;
use tabled::{Table, Tabled};
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod availability;
mod booking;
mod coach;
mod day;
mod error;
mod hours;
mod location;
mod store;
mod time;
mod waitlist;

#[derive(Parser)]
#[command(about = "Weekly lesson availability for a travelling coach")]
struct Args {
    /// Path to the JSON scenario file
    #[arg(short, long, value_name = "FILE", default_value = "data/default.json")]
    scenario: PathBuf,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, value_name = "LEVEL", default_value = "warn")]
    log_level: String,

    /// Print the week's open slots at this location as JSON and exit
    #[arg(long, value_name = "LOCATION_ID")]
    json: Option<String>,
}

#[derive(Helper, Hinter, Highlighter, Validator)]
pub struct CompleteHelper {
    pub commands: Vec<String>,
}

impl Completer for CompleteHelper {
    type Candidate = Pair;

    fn complete(&self, line: &str, _pos: usize, _ctx: &Context<'_>) -> rustyline::Result<(usize, Vec<Pair>)> {
        let candidates = self
            .commands
            .iter()
            .filter(|cmd| cmd.starts_with(line))
            .map(|cmd| Pair {
                display: cmd.clone(),
                replacement: format!("{} ", cmd),
            })
            .collect();

        Ok((0, candidates))
    }
}

const COMMANDS: [&str; 19] = [
    "ls", "hours", "set-hours", "off", "locations", "add-location", "rm-location", "slots", "book",
    "cancel", "settings", "waitlist", "wait", "mark", "unwait", "matches", "save", "help", "exit",
];

#[derive(Tabled)]
struct DayRow {
    day: DayOfWeek,
    open: usize,
    slots: String,
}

impl From<&DayAvailability> for DayRow {
    fn from(day: &DayAvailability) -> Self {
        DayRow {
            day: day.day_of_week,
            open: day.slots.len(),
            slots: if day.slots.is_empty() {
                "-".dimmed().to_string()
            } else {
                day.slots
                    .iter()
                    .map(|s| s.start_time.to_12h())
                    .collect::<Vec<_>>()
                    .join(", ")
            },
        }
    }
}

fn init_logging(default_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn paginate(content: &str) -> std::io::Result<()> {
    let mut pager = Command::new("less")
        .arg("-R")
        .stdin(Stdio::piped())
        .spawn()
        // Fallback to 'more' if 'less' isn't available
        .or_else(|_| Command::new("more").stdin(Stdio::piped()).spawn())?;

    if let Some(mut stdin) = pager.stdin.take() {
        if let Err(e) = stdin.write_all(content.as_bytes()) {
            // Broken pipe is common if the user quits the pager early
            if e.kind() != std::io::ErrorKind::BrokenPipe {
                return Err(e);
            }
        }
    }

    // Wait for the user to close the pager before returning to the prompt
    pager.wait()?;
    Ok(())
}

fn show<T: Tabled>(rows: impl IntoIterator<Item = T>, empty: &str) {
    let rows = rows.into_iter().collect::<Vec<_>>();
    if rows.is_empty() {
        println!("{}", empty);
        return;
    }
    let row_count = rows.len();
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    table.with(tabled::settings::Alignment::left());
    let rendered = table.to_string();
    if row_count > 20 && paginate(&rendered).is_ok() {
        return;
    }
    println!("{}", rendered);
}

fn print_help() {
    println!("\nAvailable Commands:");
    println!("  ls [c|x|a]                         - List bookings: c - confirmed (default), x - cancelled, a - all");
    println!("  hours                              - Show weekly working hours");
    println!("  set-hours <day> <HH:MM> <HH:MM>    - Work on <day> between the two times");
    println!("  off <day>                          - Take <day> off");
    println!("  locations                          - List locations");
    println!("  add-location <name> [address]      - Add a location");
    println!("  rm-location <id>                   - Remove a location");
    println!("  slots <location> [day]             - Open slots for a client at <location>");
    println!("  book <location> <day> <HH:MM> <client> [private|group] [size]");
    println!("                                     - Confirm a recurring weekly lesson");
    println!("  cancel <id>                        - Cancel booking <id>");
    println!("  settings [<duration> <buffer>]     - Show or change lesson length and travel buffer (minutes)");
    println!("  waitlist [w|c|b]                   - List waitlist entries, optionally by status");
    println!("  wait <location> <day> <morning|afternoon|evening|any> <client> [phone]");
    println!("                                     - Add a client to the waitlist");
    println!("  mark <id> <w|c|b>                  - Set waitlist entry status");
    println!("  unwait <id>                        - Remove a waitlist entry");
    println!("  matches <id>                       - Open slots suiting waitlist entry <id>");
    println!("  save [file]                        - Write the scenario back to disk");
    println!("  help / ?                           - Show this help menu");
    println!("  exit / quit                        - Exit\n");
}

/// Runs one REPL command. Returns `Ok(false)` when the session should end.
fn run_command(store: &mut Store, scenario: &Path, parts: &[&str]) -> Result<bool, Box<dyn Error>> {
    match parts {
        ["ls", rest @ ..] => {
            let filter = match rest.first().copied().unwrap_or("c") {
                "x" | "cancelled" => BookingFilter::Cancelled,
                "a" | "all" => BookingFilter::All,
                _ => BookingFilter::Confirmed,
            };
            show(store.bookings(filter), "No matching bookings found.");
        }
        ["hours"] => show(store.hours.iter(), "No working hours set."),
        ["set-hours", day, start, end] => {
            let hours = WorkingHours::new(day.parse()?, start.parse()?, end.parse()?);
            store.set_working_hours(hours)?;
            println!("{}", "Working hours updated.".green());
        }
        ["off", day] => {
            store.disable_day(day.parse()?);
            println!("{}", "Day disabled.".green());
        }
        ["locations"] => show(store.locations(), "No locations yet."),
        ["add-location", name, address @ ..] => {
            let id = store.add_location(name, &address.join(" "));
            println!("{} {}", "Added location".green(), id);
        }
        ["rm-location", id] => {
            let removed = store.remove_location(id)?;
            println!("{} {}", "Removed location".green(), removed);
        }
        ["slots", location, rest @ ..] => {
            let day = rest.first().map(|d| d.parse::<DayOfWeek>()).transpose()?;
            let week = store.availability_for(location)?;
            show(
                week.iter()
                    .filter(|d| day.is_none_or(|day| d.day_of_week == day))
                    .map(DayRow::from),
                "No days to show.",
            );
        }
        ["book", location, day, start, client, rest @ ..] => {
            let mut request =
                BookingRequest::private(location, day.parse()?, start.parse::<Time>()?, client);
            if let Some(kind) = rest.first() {
                request.lesson_type = kind.parse::<LessonType>()?;
            }
            if let Some(size) = rest.get(1) {
                request.group_size = size.parse()?;
            }
            let id = store.add_booking(request)?;
            println!("{} {}", "Booking confirmed:".green(), id);
        }
        ["cancel", id] => {
            store.cancel_booking(id)?;
            println!("{} {}", "Cancelled".green(), id);
        }
        ["settings"] => println!(
            "Lesson: {} min, travel buffer: {} min, page: /{}",
            store.coach.lesson_duration_minutes, store.coach.travel_buffer_minutes, store.coach.slug
        ),
        ["settings", duration, buffer] => {
            store.update_settings(duration.parse()?, buffer.parse()?)?;
            println!("{}", "Settings saved.".green());
        }
        ["waitlist", rest @ ..] => {
            let status = rest.first().map(|s| s.parse::<WaitlistStatus>()).transpose()?;
            show(store.waitlist(status), "No waitlist entries.");
        }
        ["wait", location, day, preferred, client, rest @ ..] => {
            let id = store.join_waitlist(WaitlistRequest {
                location_id: Arc::from(*location),
                day_of_week: day.parse()?,
                preferred_time: preferred.parse::<PreferredTime>()?,
                client_name: client.to_string(),
                client_phone: rest.join(" "),
                notes: String::new(),
            })?;
            println!("{} {}", "Added to waitlist:".green(), id);
        }
        ["mark", id, status] => {
            store.set_waitlist_status(id, status.parse()?)?;
            println!("{}", "Status updated.".green());
        }
        ["unwait", id] => {
            store.remove_waitlist_entry(id)?;
            println!("{} {}", "Removed".green(), id);
        }
        ["matches", id] => {
            show(store.waitlist_matches(id)?, "No matching slots right now.");
        }
        ["save", rest @ ..] => {
            let path = rest.first().map(|p| PathBuf::from(*p)).unwrap_or_else(|| scenario.to_path_buf());
            store.save_to_file(&path)?;
            println!("{} {}", "Saved to".green(), path.display());
        }
        ["help"] | ["?"] => print_help(),
        ["exit"] | ["quit"] => return Ok(false),
        [cmd, ..] if COMMANDS.contains(cmd) => {
            println!("Wrong arguments for {}. Type 'help' for usage.", cmd)
        }
        [cmd, ..] => println!("Unknown command: {}", cmd),
        [] => {}
    }
    Ok(true)
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    init_logging(&args.log_level);

    let mut store = Store::load_from_file(&args.scenario)?;

    if let Some(location) = args.json {
        let week = store.availability_for(&location)?;
        println!("{}", serde_json::to_string_pretty(&week)?);
        return Ok(());
    }

    println!(
        "Loaded {} from {}",
        store.coach.display_name.bold(),
        args.scenario.display()
    );

    let config = rustyline::Config::builder()
        .history_ignore_space(true)
        .completion_type(rustyline::CompletionType::List)
        .build();

    let helper = CompleteHelper {
        commands: COMMANDS.iter().map(|c| c.to_string()).collect(),
    };

    let mut rl = Editor::with_config(config)?;
    rl.set_helper(Some(helper));

    loop {
        let readline = rl.readline(">> ");
        match readline {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }

                rl.add_history_entry(trimmed)?;

                let parts: Vec<&str> = trimmed.split_whitespace().collect();
                debug!(command = parts[0], "repl command");
                match run_command(&mut store, &args.scenario, &parts) {
                    Ok(true) => {}
                    Ok(false) => break,
                    Err(e) => println!("{} {}", "Error:".red(), e),
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("CTRL-C");
                break;
            }
            Err(ReadlineError::Eof) => {
                println!("CTRL-D");
                break;
            }
            Err(err) => {
                println!("Error: {:?}", err);
                break;
            }
        }
    }
    Ok(())
}
