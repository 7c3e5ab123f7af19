// 🖥️ Console - menu loop, admission prompts, info screens
//
// Reads operator input line by line and writes to a shared display.
// The desk listeners print to the same display, so their lines appear
// right after the prompts that caused them.

use crate::admission::AdmissionService;
use crate::error::{parse_number, AdmissionError, AdmissionResult};
use crate::patient::{Patient, PatientType};
use crate::screen;
use anyhow::{Context, Result};
use std::cell::RefCell;
use std::fmt::Display;
use std::io::{BufRead, Write};
use std::rc::Rc;
use tracing::warn;

// ============================================================================
// STATIC SCREENS
// ============================================================================

pub const MENU_TITLE: &str = "=== Hospital Management System ===";

pub const SERVICES: [&str; 5] = [
    "24x7 Emergency Care",
    "OPD Consultation",
    "Diagnostic Labs",
    "Pharmacy Services",
    "Health Insurance Support",
];

pub const EMERGENCY_CONTACTS: [(&str, &str); 3] = [
    ("Ambulance", "108"),
    ("Reception", "044-23456789"),
    ("Emergency Desk", "044-98765432"),
];

// ============================================================================
// MENU
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    AdmitPatient,
    Services,
    EmergencyContacts,
    Exit,
}

impl MenuChoice {
    pub const ALL: [MenuChoice; 4] = [
        MenuChoice::AdmitPatient,
        MenuChoice::Services,
        MenuChoice::EmergencyContacts,
        MenuChoice::Exit,
    ];

    pub fn number(&self) -> i64 {
        match self {
            MenuChoice::AdmitPatient => 1,
            MenuChoice::Services => 2,
            MenuChoice::EmergencyContacts => 3,
            MenuChoice::Exit => 4,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MenuChoice::AdmitPatient => "Admit New Patient",
            MenuChoice::Services => "View Hospital Services",
            MenuChoice::EmergencyContacts => "Emergency Contact Info",
            MenuChoice::Exit => "Exit",
        }
    }

    pub fn parse(input: &str) -> AdmissionResult<Self> {
        let choice = parse_number("menu choice", input)?;
        MenuChoice::ALL
            .iter()
            .copied()
            .find(|c| c.number() == choice)
            .ok_or(AdmissionError::InvalidSelection {
                what: "menu",
                choice,
            })
    }
}

// ============================================================================
// CONSOLE
// ============================================================================

#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleOptions {
    /// Clear the screen before the menu and wait for a key after each action
    pub interactive: bool,

    /// Print each admission record as JSON
    pub json: bool,
}

enum Step {
    Continue,
    Quit,
}

pub struct Console<R, W> {
    input: R,
    display: Rc<RefCell<W>>,
    service: AdmissionService,
    options: ConsoleOptions,
}

impl<R, W> Console<R, W>
where
    R: BufRead,
    W: Write,
{
    pub fn new(
        input: R,
        display: Rc<RefCell<W>>,
        service: AdmissionService,
        options: ConsoleOptions,
    ) -> Self {
        Console {
            input,
            display,
            service,
            options,
        }
    }

    /// Run the menu loop until Exit or end of input
    pub fn run(&mut self) -> Result<()> {
        loop {
            if self.options.interactive {
                self.flush()?;
                screen::clear()?;
            }

            self.print_menu()?;

            let Some(line) = self.read_line()? else {
                return Ok(());
            };

            let choice = match MenuChoice::parse(&line) {
                Ok(choice) => choice,
                Err(AdmissionError::MalformedInput { .. }) => continue,
                Err(err) => {
                    warn!(%err, "menu selection rejected");
                    self.say("Invalid option.")?;
                    self.pause()?;
                    continue;
                }
            };

            let step = match choice {
                MenuChoice::AdmitPatient => self.admit_patient_flow()?,
                MenuChoice::Services => self.show_services()?,
                MenuChoice::EmergencyContacts => self.show_emergency_contacts()?,
                MenuChoice::Exit => {
                    self.say("Thank you for using Hospital System.")?;
                    Step::Quit
                }
            };

            if let Step::Quit = step {
                return self.flush();
            }

            self.pause()?;
        }
    }

    fn print_menu(&self) -> Result<()> {
        self.say(MENU_TITLE)?;
        for choice in MenuChoice::ALL {
            self.say(format!("{}. {}", choice.number(), choice.label()))?;
        }
        self.prompt("Select an option: ")
    }

    fn admit_patient_flow(&mut self) -> Result<Step> {
        self.prompt("Enter Patient ID: ")?;
        let Some(line) = self.read_line()? else {
            return Ok(Step::Quit);
        };
        let id = match parse_number("patient id", &line) {
            Ok(id) => id,
            Err(err) => {
                warn!(%err, "admission skipped");
                self.say(err)?;
                return Ok(Step::Continue);
            }
        };

        self.prompt("Enter Patient Name: ")?;
        let Some(name) = self.read_line()? else {
            return Ok(Step::Quit);
        };

        self.say("\nSelect Patient Type")?;
        for patient_type in PatientType::ALL {
            self.say(format!("{}. {}", patient_type.selector(), patient_type))?;
        }
        self.prompt("Choice: ")?;
        let Some(line) = self.read_line()? else {
            return Ok(Step::Quit);
        };

        let patient_type =
            match parse_number("patient type choice", &line).and_then(PatientType::from_selector) {
                Ok(patient_type) => patient_type,
                Err(err @ AdmissionError::InvalidSelection { .. }) => {
                    warn!(%err, "admission skipped");
                    self.say("Invalid Choice")?;
                    return Ok(Step::Continue);
                }
                Err(err) => {
                    warn!(%err, "admission skipped");
                    self.say(err)?;
                    return Ok(Step::Continue);
                }
            };

        let record = self.service.admit(Patient::new(id, name, patient_type))?;

        if self.options.json {
            let json = serde_json::to_string_pretty(&record)
                .context("Failed to serialize admission record")?;
            self.say(json)?;
        }

        Ok(Step::Continue)
    }

    fn show_services(&self) -> Result<Step> {
        self.say("\n--- Hospital Services ---")?;
        for service in SERVICES {
            self.say(format!("• {}", service))?;
        }
        Ok(Step::Continue)
    }

    fn show_emergency_contacts(&self) -> Result<Step> {
        self.say("\n--- Emergency Contacts ---")?;
        for (desk, number) in EMERGENCY_CONTACTS {
            self.say(format!("{}: {}", desk, number))?;
        }
        Ok(Step::Continue)
    }

    fn pause(&self) -> Result<()> {
        if !self.options.interactive {
            return self.say("");
        }

        self.say("\nPress any key to continue...")?;
        self.flush()?;
        screen::wait_for_key()
    }

    // ------------------------------------------------------------------------
    // I/O helpers
    // ------------------------------------------------------------------------

    /// Next input line without its line ending; None at end of input
    fn read_line(&mut self) -> Result<Option<String>> {
        let mut buf = String::new();
        let read = self
            .input
            .read_line(&mut buf)
            .context("Failed to read console input")?;

        if read == 0 {
            return Ok(None);
        }

        Ok(Some(buf.trim_end_matches(|c| c == '\r' || c == '\n').to_string()))
    }

    fn say(&self, text: impl Display) -> Result<()> {
        writeln!(self.display.borrow_mut(), "{}", text).context("Failed to write to console")?;
        Ok(())
    }

    fn prompt(&self, text: &str) -> Result<()> {
        let mut out = self.display.borrow_mut();
        write!(out, "{}", text).context("Failed to write to console")?;
        out.flush().context("Failed to flush console")?;
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        self.display
            .borrow_mut()
            .flush()
            .context("Failed to flush console")?;
        Ok(())
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notifications::{register_desks, NotificationHub};
    use std::io::Cursor;

    fn run_session(input: &str, options: ConsoleOptions) -> String {
        let display = Rc::new(RefCell::new(Vec::<u8>::new()));
        let mut hub = NotificationHub::new();
        register_desks(&mut hub, Rc::clone(&display));
        let service = AdmissionService::new(hub);

        let mut console = Console::new(
            Cursor::new(input.as_bytes().to_vec()),
            Rc::clone(&display),
            service,
            options,
        );
        console.run().unwrap();

        let printed = display.borrow().clone();
        String::from_utf8(printed).unwrap()
    }

    fn plain(input: &str) -> String {
        run_session(input, ConsoleOptions::default())
    }

    #[test]
    fn test_menu_choice_parse() {
        assert_eq!(MenuChoice::parse("1"), Ok(MenuChoice::AdmitPatient));
        assert_eq!(MenuChoice::parse(" 4 "), Ok(MenuChoice::Exit));
        assert_eq!(
            MenuChoice::parse("7"),
            Err(AdmissionError::InvalidSelection {
                what: "menu",
                choice: 7,
            })
        );
        assert!(matches!(
            MenuChoice::parse("admit"),
            Err(AdmissionError::MalformedInput { .. })
        ));
    }

    #[test]
    fn test_exit_immediately() {
        let out = plain("4\n");

        assert!(out.starts_with(MENU_TITLE));
        assert!(out.contains("1. Admit New Patient"));
        assert!(out.contains("4. Exit"));
        assert!(out.ends_with("Thank you for using Hospital System.\n"));
    }

    #[test]
    fn test_end_of_input_ends_session() {
        let out = plain("");
        assert!(out.ends_with("Select an option: "));
    }

    #[test]
    fn test_admit_insurance_patient() {
        let out = plain("1\n1\nAsha\n3\n4\n");

        assert!(out.contains("Enter Patient ID: Enter Patient Name: "));
        assert!(out.contains("1. General\n2. Emergency\n3. Insurance\nChoice: "));
        assert!(out.contains(
            "[Reception] Patient Asha admitted.\n[Accounts] Final bill for Asha is Rs.1500\n"
        ));
    }

    #[test]
    fn test_admit_general_and_emergency_patients() {
        let out = plain("1\n2\nBen\n1\n1\n3\nChitra\n2\n4\n");

        assert!(out.contains("[Accounts] Final bill for Ben is Rs.2360"));
        assert!(out.contains("[Accounts] Final bill for Chitra is Rs.5900"));
    }

    #[test]
    fn test_invalid_patient_type_skips_admission() {
        let out = plain("1\n9\nZed\n5\n4\n");

        assert!(out.contains("Invalid Choice"));
        assert!(!out.contains("[Reception]"));
        assert!(!out.contains("[Accounts]"));
        assert!(out.ends_with("Thank you for using Hospital System.\n"));
    }

    #[test]
    fn test_malformed_patient_id_skips_admission() {
        let out = plain("1\nabc\n4\n");

        assert!(out.contains("Malformed patient id: 'abc' is not a number"));
        assert!(!out.contains("Enter Patient Name"));
        assert!(!out.contains("[Reception]"));
    }

    #[test]
    fn test_malformed_menu_choice_redraws_menu() {
        let out = plain("hello\n4\n");

        assert_eq!(out.matches(MENU_TITLE).count(), 2);
        assert!(!out.contains("Invalid option."));
    }

    #[test]
    fn test_unknown_menu_number() {
        let out = plain("8\n4\n");
        assert!(out.contains("Invalid option."));
    }

    #[test]
    fn test_info_screens() {
        let out = plain("2\n3\n4\n");

        assert!(out.contains("--- Hospital Services ---\n• 24x7 Emergency Care\n"));
        assert!(out.contains("• Health Insurance Support"));
        assert!(out.contains("--- Emergency Contacts ---\nAmbulance: 108\n"));
        assert!(out.contains("Emergency Desk: 044-98765432"));
    }

    #[test]
    fn test_json_record_output() {
        let options = ConsoleOptions {
            interactive: false,
            json: true,
        };
        let out = run_session("1\n1\nAsha\n3\n4\n", options);

        assert!(out.contains("\"final_amount\": 1500.0"));
        assert!(out.contains("\"plan\": \"Insurance\""));
        assert!(out.contains("\"admission_id\""));
    }

    #[test]
    fn test_end_of_input_during_admission() {
        let out = plain("1\n5\n");
        assert!(out.ends_with("Enter Patient Name: "));
    }
}
