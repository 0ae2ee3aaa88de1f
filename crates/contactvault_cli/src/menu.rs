//! Numbered menu over a `ContactStore`.
//!
//! # Responsibility
//! - Map menu choices 1-8 to store use-cases and print their results.
//! - Turn overwrite confirmation and edit prompts into store callbacks.
//!
//! # Invariants
//! - Store errors are printed as `Error: ...` and the loop continues.
//! - End of input ends the session like Exit, without a partial write.

use crate::prompt::Prompter;
use contactvault_core::{
    split_groups, Contact, ContactEdit, ContactServiceError, ContactStore, UpsertOutcome,
};
use log::warn;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

const SEPARATOR: &str = "--------------------";

/// One entry of the main menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Add,
    Delete,
    Search,
    Display,
    Edit,
    Export,
    Import,
    Exit,
}

impl FromStr for MenuChoice {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "1" => Ok(Self::Add),
            "2" => Ok(Self::Delete),
            "3" => Ok(Self::Search),
            "4" => Ok(Self::Display),
            "5" => Ok(Self::Edit),
            "6" => Ok(Self::Export),
            "7" => Ok(Self::Import),
            "8" => Ok(Self::Exit),
            other => Err(format!("unrecognized menu choice `{other}`")),
        }
    }
}

/// Interactive loop over a contact store.
pub struct Menu<'a, R, W> {
    store: &'a ContactStore,
    prompter: &'a Prompter<R, W>,
    export_path: PathBuf,
}

impl<'a, R: BufRead, W: Write> Menu<'a, R, W> {
    pub fn new(
        store: &'a ContactStore,
        prompter: &'a Prompter<R, W>,
        export_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            store,
            prompter,
            export_path: export_path.into(),
        }
    }

    /// Runs until Exit is chosen or input ends.
    ///
    /// Store errors are printed and the loop continues; only console I/O
    /// failures end it early.
    pub fn run(&self) -> io::Result<()> {
        loop {
            self.show_menu()?;
            let Some(answer) = self.prompter.ask("Enter your choice (1-8): ")? else {
                break;
            };

            let choice = match answer.parse::<MenuChoice>() {
                Ok(choice) => choice,
                Err(_) => {
                    self.prompter
                        .say("Invalid choice. Please enter a number between 1 and 8.")?;
                    continue;
                }
            };

            let handled = match choice {
                MenuChoice::Add => self.add_contact(),
                MenuChoice::Delete => self.delete_contact(),
                MenuChoice::Search => self.search_contact(),
                MenuChoice::Display => self.display_contacts(),
                MenuChoice::Edit => self.edit_contact(),
                MenuChoice::Export => self.export_contacts(),
                MenuChoice::Import => self.import_contacts(),
                MenuChoice::Exit => break,
            };
            match handled {
                Ok(Flow::Continue) => {}
                Ok(Flow::EndOfInput) => return Ok(()),
                Err(err) => return Err(err),
            }
        }

        self.prompter.say("Exiting ContactVault.")
    }

    fn show_menu(&self) -> io::Result<()> {
        self.prompter.say("\nContactVault Menu:")?;
        for line in [
            "1. Add Contact",
            "2. Delete Contact",
            "3. Search Contact",
            "4. Display Contacts",
            "5. Edit Contact",
            "6. Export to CSV",
            "7. Bulk Add Contacts",
            "8. Exit",
        ] {
            self.prompter.say(line)?;
        }
        Ok(())
    }

    fn add_contact(&self) -> io::Result<Flow> {
        let mut answers = Vec::with_capacity(7);
        for prompt in [
            "Enter contact name: ",
            "Enter phone number: ",
            "Enter work (optional): ",
            "Enter company (optional): ",
            "Enter title (optional): ",
            "Enter email (optional): ",
            "Enter groups (optional, comma-separated): ",
        ] {
            match self.prompter.ask(prompt)? {
                Some(answer) => answers.push(answer),
                None => return Ok(Flow::EndOfInput),
            }
        }

        let mut answers = answers.into_iter();
        let mut next = || answers.next().unwrap_or_default();
        let contact = Contact {
            name: next(),
            phone_number: Some(next()),
            work: Some(next()),
            company: Some(next()),
            title: Some(next()),
            email: Some(next()),
            groups: split_groups(&next()),
        }
        .normalized();

        match self
            .store
            .upsert(&contact, |existing| self.confirm_overwrite(existing))
        {
            Ok(UpsertOutcome::Declined) => self.prompter.say("Contact not added/updated.")?,
            Ok(_) => self
                .prompter
                .say(format_args!("Contact added/updated: {}", contact.name))?,
            Err(err) => self.report(&err)?,
        }
        Ok(Flow::Continue)
    }

    fn delete_contact(&self) -> io::Result<Flow> {
        let Some(name) = self.prompter.ask("Enter contact name to delete: ")? else {
            return Ok(Flow::EndOfInput);
        };

        match self.store.delete(&name) {
            Ok(()) => self.prompter.say(format_args!("Contact deleted: {name}"))?,
            Err(err) => self.report(&err)?,
        }
        Ok(Flow::Continue)
    }

    fn search_contact(&self) -> io::Result<Flow> {
        let Some(name) = self.prompter.ask("Enter contact name to search: ")? else {
            return Ok(Flow::EndOfInput);
        };

        match self.store.find(&name) {
            Ok(contact) => {
                self.prompter.say(format_args!("Contact found: {name}"))?;
                self.print_fields(&contact)?;
            }
            Err(err) => self.report(&err)?,
        }
        Ok(Flow::Continue)
    }

    fn display_contacts(&self) -> io::Result<Flow> {
        let contacts = match self.store.list() {
            Ok(contacts) => contacts,
            Err(err) => {
                self.report(&err)?;
                return Ok(Flow::Continue);
            }
        };

        if contacts.is_empty() {
            self.prompter.say("No contacts available.")?;
            return Ok(Flow::Continue);
        }

        self.prompter.say("\nContact List:")?;
        for contact in &contacts {
            self.prompter.say(SEPARATOR)?;
            self.print_fields(contact)?;
            self.prompter.say(SEPARATOR)?;
        }
        Ok(Flow::Continue)
    }

    fn edit_contact(&self) -> io::Result<Flow> {
        let Some(name) = self.prompter.ask("Enter contact name to edit: ")? else {
            return Ok(Flow::EndOfInput);
        };

        let result = self.store.edit(
            &name,
            |current| self.prompt_edit(current),
            |existing| self.confirm_overwrite(existing),
        );
        match result {
            Ok(UpsertOutcome::Declined) => self.prompter.say("Contact not added/updated.")?,
            Ok(_) => self.prompter.say(format_args!("Contact updated: {name}"))?,
            Err(err) => self.report(&err)?,
        }
        Ok(Flow::Continue)
    }

    fn export_contacts(&self) -> io::Result<Flow> {
        match self.store.export_all(&self.export_path) {
            Ok(_) => self.prompter.say(format_args!(
                "Contacts exported to CSV: {}",
                self.export_path.display()
            ))?,
            Err(err) => self.report(&err)?,
        }
        Ok(Flow::Continue)
    }

    fn import_contacts(&self) -> io::Result<Flow> {
        let Some(path) = self.prompter.ask("Enter the CSV file path for bulk add: ")? else {
            return Ok(Flow::EndOfInput);
        };
        let path = Path::new(&path);

        match self
            .store
            .import_bulk(path, |existing| self.confirm_overwrite(existing))
        {
            Ok(report) => {
                self.prompter
                    .say(format_args!("Bulk contacts added from {}.", path.display()))?;
                self.prompter.say(format_args!(
                    "Added: {}, updated: {}, kept: {}, skipped without name: {}",
                    report.created, report.replaced, report.declined, report.skipped
                ))?;
            }
            Err(err) => self.report(&err)?,
        }
        Ok(Flow::Continue)
    }

    fn prompt_edit(&self, current: &Contact) -> ContactEdit {
        self.prompter
            .say(format_args!("Editing contact: {}", current.name))
            .and_then(|()| self.read_edit(current))
            .unwrap_or_else(|err| {
                warn!("event=contact_edit module=cli status=error error={err}");
                ContactEdit::default()
            })
    }

    fn read_edit(&self, current: &Contact) -> io::Result<ContactEdit> {
        let ask = |label: &str, value: &Option<String>| -> io::Result<Option<String>> {
            let prompt = format!(
                "Enter new {label} (current: {}): ",
                value.as_deref().unwrap_or_default()
            );
            Ok(self.prompter.ask(&prompt)?.filter(|answer| !answer.is_empty()))
        };

        let phone_number = ask("phone number", &current.phone_number)?;
        let work = ask("work", &current.work)?;
        let company = ask("company", &current.company)?;
        let title = ask("title", &current.title)?;
        let email = ask("email", &current.email)?;
        let groups = self
            .prompter
            .ask(&format!(
                "Enter new groups (comma-separated, current: {}): ",
                current.groups.join(",")
            ))?
            .filter(|answer| !answer.is_empty())
            .map(|answer| split_groups(&answer));

        Ok(ContactEdit {
            phone_number,
            work,
            company,
            title,
            email,
            groups,
        })
    }

    fn confirm_overwrite(&self, existing: &Contact) -> bool {
        let asked = self
            .prompter
            .say(format_args!(
                "A contact with the name '{}' already exists.",
                existing.name
            ))
            .and_then(|()| {
                self.prompter
                    .confirm("Do you want to overwrite the existing contact? (y/n): ")
            });

        asked.unwrap_or_else(|err| {
            warn!("event=contact_confirm module=cli status=error error={err}");
            false
        })
    }

    fn print_fields(&self, contact: &Contact) -> io::Result<()> {
        for (column, value) in contact.present_columns() {
            self.prompter
                .say(format_args!("{}: {value}", column_label(column)))?;
        }
        Ok(())
    }

    fn report(&self, err: &ContactServiceError) -> io::Result<()> {
        self.prompter.say(format_args!("Error: {err}"))
    }
}

enum Flow {
    Continue,
    EndOfInput,
}

/// `phone_number` -> `Phone number`.
fn column_label(column: &str) -> String {
    let spaced = column.replace('_', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
