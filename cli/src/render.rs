//! Plain-text rendering of the view states.

use pocketbook::format::format_money;
use pocketbook::views::balances::BalancesState;
use pocketbook::views::items::{ItemCard, ItemsState};

pub fn balances(state: &BalancesState) -> Vec<String> {
    let mut out = state.lines();
    if out.is_empty() {
        out.push("(no balances)".to_owned());
    }
    if let Some(total) = state.total_line() {
        out.push(total);
    }
    out
}

fn card_line(card: &ItemCard) -> String {
    let mut line = format!("[{}] {} {}", card.priority, card.name, card.price_label);
    if let Some(pct) = card.funded_percent {
        line.push_str(&format!(" ({pct}% funded)"));
    }
    line
}

pub fn items(state: &ItemsState) -> Vec<String> {
    let mut out: Vec<String> = state.cards().iter().map(card_line).collect();
    if out.is_empty() {
        out.push("(no items)".to_owned());
    }
    if let Some(balance) = &state.default_balance {
        out.push(format!("Default balance: {} {}", balance.name, format_money(balance.amount)));
    }
    out
}

#[cfg(test)]
#[path = "render_test.rs"]
mod tests;
