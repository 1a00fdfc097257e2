use colored::Colorize;
use mochify::commands::{CmdMessage, MessageLevel};
use mochify::config::{ExportConfig, CONFIG_KEYS};
use mochify::model::{Card, MediaRef};

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

pub(super) fn print_deck(deck_name: &str, cards: &[Card], media: &[MediaRef]) {
    if cards.is_empty() {
        return;
    }
    println!("{} ({} cards)", deck_name.bold(), cards.len());
    for (i, card) in cards.iter().enumerate() {
        println!();
        println!("{} {}", format!("{}.", i + 1).yellow(), card.term.bold());
        for line in card.content.lines() {
            println!("    {}", line);
        }
    }
    if !media.is_empty() {
        println!();
        println!("{}", "Media:".bold());
        for m in media {
            println!("    {} {}", m.file_name, format!("-> {}", m.uid).dimmed());
        }
    }
}

pub(super) fn print_config(config: &ExportConfig) {
    for key in CONFIG_KEYS {
        println!("{} = {}", key, config.get(key).unwrap_or_default());
    }
}
