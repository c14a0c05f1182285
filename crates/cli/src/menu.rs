//! Interactive numbered menu over the person service.
//!
//! Each selection is one request/response round trip into the service; the
//! menu holds no state of its own between selections. Errors are reported
//! per the domain taxonomy (validation, duplicate, store failure) and the
//! loop keeps serving. End-of-input on stdin exits like menu option 0.

use std::io::{self, BufRead, Write};

use padron_core::identifier;
use padron_db::models::person::{Person, PersonInput};
use padron_service::{PersonService, PgStore, ServiceError};

const NAME_COL_WIDTH: usize = 25;
const EMAIL_COL_WIDTH: usize = 30;

/// What to do after a menu selection finished.
enum Flow {
    Continue,
    Exit,
}

/// Run the menu loop until the operator exits or stdin closes.
pub async fn run(service: &PersonService<PgStore>) -> io::Result<()> {
    println!("===========================================");
    println!("  Person Registry");
    println!("===========================================");

    loop {
        print_menu();
        let Some(choice) = read_line("\nSelect an option: ")? else {
            break;
        };

        let flow = match choice.as_str() {
            "1" => list_persons(service).await,
            "2" => find_person(service).await?,
            "3" => create_person(service).await?,
            "4" => edit_person(service).await?,
            "5" => toggle_person(service).await?,
            "0" => Flow::Exit,
            _ => {
                println!("Invalid option, try again.");
                Flow::Continue
            }
        };

        if let Flow::Exit = flow {
            break;
        }
    }

    println!("Bye.");
    Ok(())
}

fn print_menu() {
    println!("\n--- MAIN MENU ---");
    println!("1) List persons");
    println!("2) Find person by id");
    println!("3) Create person");
    println!("4) Edit person");
    println!("5) Activate / deactivate person");
    println!("0) Exit");
}

// ---------------------------------------------------------------------------
// Menu actions
// ---------------------------------------------------------------------------

async fn list_persons(service: &PersonService<PgStore>) -> Flow {
    println!("\n--- LIST PERSONS ---");
    let people = match service.list().await {
        Ok(people) => people,
        Err(err) => {
            report_error(&err);
            return Flow::Continue;
        }
    };

    if people.is_empty() {
        println!("No persons registered.");
        return Flow::Continue;
    }

    println!(
        "{:<5} {:<12} {:<NAME_COL_WIDTH$} {:<EMAIL_COL_WIDTH$} {:<6} {:<16}",
        "ID", "NATIONAL ID", "NAME", "EMAIL", "ACTIVE", "CREATED"
    );
    println!("{}", "-".repeat(99));
    for person in &people {
        println!("{}", table_row(person));
    }
    Flow::Continue
}

async fn find_person(service: &PersonService<PgStore>) -> io::Result<Flow> {
    println!("\n--- FIND PERSON ---");
    let Some(id) = read_id("Person id: ")? else {
        return Ok(Flow::Exit);
    };
    let Ok(id) = id else {
        return Ok(Flow::Continue);
    };

    match service.find_by_id(id).await {
        Ok(Some(person)) => {
            println!("\nPerson found:");
            print_detail(&person);
        }
        Ok(None) => println!("No person found with id {id}."),
        Err(err) => report_error(&err),
    }
    Ok(Flow::Continue)
}

async fn create_person(service: &PersonService<PgStore>) -> io::Result<Flow> {
    println!("\n--- CREATE PERSON ---");
    let Some(input) = read_person_input()? else {
        return Ok(Flow::Exit);
    };
    let Ok(input) = input else {
        return Ok(Flow::Continue);
    };

    match service.create(input).await {
        Ok(person) => {
            println!("\nPerson created:");
            print_detail(&person);
        }
        Err(err) => report_error(&err),
    }
    Ok(Flow::Continue)
}

async fn edit_person(service: &PersonService<PgStore>) -> io::Result<Flow> {
    println!("\n--- EDIT PERSON ---");
    let Some(id) = read_id("Id of the person to edit: ")? else {
        return Ok(Flow::Exit);
    };
    let Ok(id) = id else {
        return Ok(Flow::Continue);
    };

    let Some(input) = read_person_input()? else {
        return Ok(Flow::Exit);
    };
    let Ok(input) = input else {
        return Ok(Flow::Continue);
    };

    match service.update(id, input).await {
        Ok(true) => println!("\nPerson updated."),
        Ok(false) => println!("\nNo person found with id {id}."),
        Err(err) => report_error(&err),
    }
    Ok(Flow::Continue)
}

async fn toggle_person(service: &PersonService<PgStore>) -> io::Result<Flow> {
    println!("\n--- ACTIVATE / DEACTIVATE PERSON ---");
    let Some(id) = read_id("Person id: ")? else {
        return Ok(Flow::Exit);
    };
    let Ok(id) = id else {
        return Ok(Flow::Continue);
    };

    match service.toggle_active(id).await {
        Ok(true) => println!("\nStatus changed."),
        Ok(false) => println!("\nNo person found with id {id}."),
        Err(err) => report_error(&err),
    }
    Ok(Flow::Continue)
}

// ---------------------------------------------------------------------------
// Input helpers
// ---------------------------------------------------------------------------

/// Prompt and read one line. `None` means stdin reached end-of-input.
fn read_line(prompt: &str) -> io::Result<Option<String>> {
    print!("{prompt}");
    io::stdout().flush()?;

    let mut line = String::new();
    if io::stdin().lock().read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Prompt for a numeric id. The outer `Option` is end-of-input; the inner
/// `Result` reports an unparseable entry, already announced to the
/// operator.
fn read_id(prompt: &str) -> io::Result<Option<Result<i64, ()>>> {
    let Some(raw) = read_line(prompt)? else {
        return Ok(None);
    };
    match raw.parse::<i64>() {
        Ok(id) => Ok(Some(Ok(id))),
        Err(_) => {
            println!("Invalid id: expected a number.");
            Ok(Some(Err(())))
        }
    }
}

/// Prompt for the identifier, name and email of a person.
///
/// The raw identifier string is run through the parser here, so the
/// service only ever sees structured fields.
fn read_person_input() -> io::Result<Option<Result<PersonInput, ()>>> {
    let Some(raw_id) = read_line("National identifier (format 12345678-9): ")? else {
        return Ok(None);
    };
    let Some(full_name) = read_line("Full name: ")? else {
        return Ok(None);
    };
    let Some(email) = read_line("Email: ")? else {
        return Ok(None);
    };

    let national_id = match identifier::parse(&raw_id) {
        Ok(parsed) => parsed,
        Err(err) => {
            println!("{err}");
            return Ok(Some(Err(())));
        }
    };

    Ok(Some(Ok(PersonInput {
        id_number: national_id.number,
        check_digit: national_id.check_digit.to_string(),
        full_name,
        email,
    })))
}

// ---------------------------------------------------------------------------
// Output helpers
// ---------------------------------------------------------------------------

fn report_error(err: &ServiceError) {
    match err {
        ServiceError::Core(core) => println!("{core}"),
        ServiceError::Store(store) => {
            tracing::error!(error = %store, "Store failure");
            println!("Unexpected store failure: {store}. The operation was not applied.");
        }
    }
}

fn print_detail(person: &Person) {
    println!("Id:          {}", person.id);
    println!(
        "National id: {}",
        national_id_label(person.id_number, &person.check_digit)
    );
    println!("Name:        {}", person.full_name);
    println!("Email:       {}", person.email);
    println!("Active:      {}", active_label(person.is_active));
    println!("Created:     {}", person.created_at.format("%Y-%m-%d %H:%M"));
}

fn table_row(person: &Person) -> String {
    format!(
        "{:<5} {:<12} {:<NAME_COL_WIDTH$} {:<EMAIL_COL_WIDTH$} {:<6} {:<16}",
        person.id,
        national_id_label(person.id_number, &person.check_digit),
        truncate(&person.full_name, NAME_COL_WIDTH),
        truncate(&person.email, EMAIL_COL_WIDTH),
        active_label(person.is_active),
        person.created_at.format("%Y-%m-%d %H:%M").to_string(),
    )
}

fn national_id_label(id_number: i64, check_digit: &str) -> String {
    format!("{id_number}-{check_digit}")
}

fn active_label(active: bool) -> &'static str {
    if active {
        "yes"
    } else {
        "no"
    }
}

/// Shorten a value to at most `max` characters, ending in `...` when cut.
fn truncate(value: &str, max: usize) -> String {
    let value = value.trim();
    if value.chars().count() <= max {
        return value.to_string();
    }
    let kept: String = value.chars().take(max - 3).collect();
    format!("{kept}...")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
