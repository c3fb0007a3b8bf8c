//! Interactive shell
//!
//! Menu-driven front end over the [`AccountStore`]. The shell only collects
//! input, parses amounts and prints results; every rule lives in the store.
//!
//! The shell is generic over its input and output so whole sessions can be
//! scripted in tests.
//!
//! # Menus
//!
//! - Top level: open account, login, exit
//! - Session: check balance, deposit, withdraw, transfer, logout
//!
//! Domain errors are printed and control returns to the current menu. End of
//! input behaves like choosing exit.

use crate::core::{AccountStore, RecordLog};
use crate::io::parse_amount;
use crate::types::{AccountKind, BankError};
use rust_decimal::Decimal;
use std::io::{self, BufRead, Write};
use tracing::error;

/// Interactive menu loop bound to one store
pub struct Shell<'a, L: RecordLog, R, W> {
    store: &'a mut AccountStore<L>,
    input: R,
    output: W,
}

impl<'a, L, R, W> Shell<'a, L, R, W>
where
    L: RecordLog,
    R: BufRead,
    W: Write,
{
    pub fn new(store: &'a mut AccountStore<L>, input: R, output: W) -> Self {
        Shell {
            store,
            input,
            output,
        }
    }

    /// Run the top-level menu until the user exits or input ends
    ///
    /// # Errors
    ///
    /// Only terminal I/O failures are returned; ledger errors are reported to
    /// the user and the loop continues.
    pub fn run(&mut self) -> io::Result<()> {
        writeln!(self.output, "Welcome to the Terminal Bank Application")?;

        loop {
            writeln!(self.output, "\n1. Open Account\n2. Login\n3. Exit")?;
            let choice = match self.prompt("Enter your choice: ")? {
                Some(choice) => choice,
                None => break,
            };

            match choice.trim() {
                "1" => self.open_account()?,
                "2" => self.login()?,
                "3" => break,
                _ => writeln!(self.output, "Invalid choice. Please try again.")?,
            }
        }

        writeln!(self.output, "Thank you for using Terminal Bank. Goodbye!")?;
        self.output.flush()
    }

    fn open_account(&mut self) -> io::Result<()> {
        let Some(kind) = self.prompt("Enter account type (Personal/Business): ")? else {
            return Ok(());
        };
        let Some(secret) = self.prompt("Enter your password: ")? else {
            return Ok(());
        };

        let kind = AccountKind::from_label(kind.trim());
        let created = self
            .store
            .create_account(kind, &secret)
            .map(|account| account.id().to_string());

        match created {
            Ok(id) => writeln!(
                self.output,
                "Account created successfully. Your account number is {}",
                id
            ),
            Err(e) => self.report(&e),
        }
    }

    fn login(&mut self) -> io::Result<()> {
        let Some(id) = self.prompt("Enter your account number: ")? else {
            return Ok(());
        };
        let Some(secret) = self.prompt("Enter your password: ")? else {
            return Ok(());
        };

        let id = id.trim().to_string();
        let kind = match self.store.authenticate(&id, &secret).map(|a| a.kind()) {
            Ok(kind) => kind,
            Err(e) => return self.report(&e),
        };

        writeln!(self.output, "Welcome, {} account holder!", kind)?;
        self.session(&id)
    }

    fn session(&mut self, id: &str) -> io::Result<()> {
        loop {
            writeln!(
                self.output,
                "\n1. Check Balance\n2. Deposit\n3. Withdraw\n4. Transfer\n5. Logout"
            )?;
            let choice = match self.prompt("Enter your choice: ")? {
                Some(choice) => choice,
                None => return Ok(()),
            };

            match choice.trim() {
                "1" => match self.store.get(id).map(|a| a.balance()) {
                    Some(balance) => writeln!(self.output, "Your balance is: {:.2}", balance)?,
                    None => self.report(&BankError::account_not_found(id))?,
                },
                "2" => {
                    let Some(amount) = self.prompt_amount("Enter amount to deposit: ")? else {
                        continue;
                    };
                    match self.store.deposit(id, amount) {
                        Ok(balance) => writeln!(
                            self.output,
                            "Deposited successfully. New balance: {:.2}",
                            balance
                        )?,
                        Err(e) => self.report(&e)?,
                    }
                }
                "3" => {
                    let Some(amount) = self.prompt_amount("Enter amount to withdraw: ")? else {
                        continue;
                    };
                    match self.store.withdraw(id, amount) {
                        Ok(balance) => writeln!(
                            self.output,
                            "Withdrawn successfully. New balance: {:.2}",
                            balance
                        )?,
                        Err(e) => self.report(&e)?,
                    }
                }
                "4" => {
                    let Some(recipient) = self.prompt("Enter account number to transfer to: ")?
                    else {
                        continue;
                    };
                    let Some(amount) = self.prompt_amount("Enter amount to transfer: ")? else {
                        continue;
                    };
                    match self.store.transfer(id, recipient.trim(), amount) {
                        Ok(balance) => writeln!(
                            self.output,
                            "Transferred successfully. New balance: {:.2}",
                            balance
                        )?,
                        Err(e) => self.report(&e)?,
                    }
                }
                "5" => {
                    writeln!(self.output, "Logged out successfully.")?;
                    return Ok(());
                }
                _ => writeln!(self.output, "Invalid choice. Please try again.")?,
            }
        }
    }

    /// Print a prompt and read one line, without its line ending
    ///
    /// Returns `None` at end of input.
    fn prompt(&mut self, text: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}", text)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }

        let trimmed = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }

    /// Prompt for an amount; unparseable text is reported and yields `None`
    fn prompt_amount(&mut self, text: &str) -> io::Result<Option<Decimal>> {
        let Some(raw) = self.prompt(text)? else {
            return Ok(None);
        };

        match parse_amount(&raw) {
            Some(amount) => Ok(Some(amount)),
            None => {
                writeln!(self.output, "Invalid amount: {}", raw.trim())?;
                Ok(None)
            }
        }
    }

    fn report(&mut self, e: &BankError) -> io::Result<()> {
        if !e.is_recoverable() {
            error!(error = %e, "ledger write failed during session");
        }
        writeln!(self.output, "{}", e)
    }
}
