use colored::Colorize;
use std::fmt::Display;

/// `[*]` progress line.
pub fn info(msg: impl Display) {
    println!("{}", format!("[*] {msg}").cyan());
}

/// `[+]` success line.
pub fn success(msg: impl Display) {
    println!("{}", format!("[+] {msg}").green());
}

/// `[!]` warning line.
pub fn warn(msg: impl Display) {
    println!("{}", format!("[!] {msg}").yellow());
}

/// `[-]` error line. Goes to stderr so it survives stdout redirection.
pub fn error(msg: impl Display) {
    eprintln!("{}", format!("[-] {msg}").red());
}

pub fn rule() {
    println!("{}", "-".repeat(50));
}

pub fn print_banner() {
    println!(
        "{}",
        r#"
                              __ _
   _ __ ___  ___ ___  _ __   / _| | _____      __
  | '__/ _ \/ __/ _ \| '_ \ | |_| |/ _ \ \ /\ / /
  | | |  __/ (_| (_) | | | ||  _| | (_) \ V  V /
  |_|  \___|\___\___/|_| |_||_| |_|\___/ \_/\_/

        Auto-Install & Recon Pipeline v0.1.0
    "#
        .bright_magenta()
    );
}

pub fn print_completion() {
    println!();
    println!("{}", "[!!!] All Recon Tasks Completed [!!!]".bright_green());
}
