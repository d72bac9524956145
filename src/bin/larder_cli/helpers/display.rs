// ABOUTME: Output formatting helpers for larder-cli
// ABOUTME: Renders suggestions, the displayed recipe and the cart table in the terminal
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use larder::{
    engine::{CartView, Lookup},
    errors::ErrorResponseDetails,
    models::SelectedIngredients,
    session::RecipeView,
};

/// Greeting shown once at startup
pub fn print_banner(cart_items: usize) {
    println!("Larder - find recipes for what you already have");
    println!("{}", "=".repeat(60));
    if cart_items > 0 {
        println!("Your cart holds {cart_items} item(s) from last time. Type `cart` to see it.");
    }
    println!("Type `help` for the list of commands.\n");
}

/// Command reference
pub fn print_help() {
    println!("Commands:");
    println!("  find <text>          suggest ingredients");
    println!("  add <a>, <b>         select ingredients");
    println!("  remove <a>, <b>      deselect ingredients");
    println!("  selected             show the selection");
    println!("  search               find recipes for the selection");
    println!("  skip                 show the next recipe");
    println!("  clear                hide the recipe and clear the selection");
    println!("  save                 add the missing ingredients to the cart");
    println!("  empty                empty the cart");
    println!("  cart                 show the cart");
    println!("  quit                 leave");
}

fn print_problem(prefix: &str, problem: &ErrorResponseDetails) {
    let hint = if problem.retryable {
        " (try again)"
    } else {
        ""
    };
    println!("{prefix}: {}{hint}", problem.message);
}

/// Autocomplete options
pub fn print_suggestions(lookup: &Lookup) {
    if let Some(warning) = &lookup.warning {
        print_problem("Suggestions unavailable", warning);
    }
    if lookup.suggestions.is_empty() {
        println!("No matching ingredients.");
        return;
    }
    for suggestion in &lookup.suggestions {
        println!("  {}", suggestion.display_label);
    }
}

/// Current selection
pub fn print_selection(selected: &SelectedIngredients) {
    if selected.is_empty() {
        println!("No ingredients selected.");
    } else {
        println!(
            "Selected: {}",
            selected.iter().collect::<Vec<_>>().join(", ")
        );
    }
}

/// Displayed recipe, or why nothing is displayed
pub fn print_recipe(view: &RecipeView) {
    if let Some(error) = &view.error {
        print_problem("Search failed", error);
    }

    let Some(detail) = view.detail.as_ref().filter(|_| view.visible) else {
        println!("No results to display.");
        return;
    };

    println!("\n{}", detail.title);
    println!("{}", "-".repeat(detail.title.chars().count().max(10)));
    println!(
        "Recipe {} of {}  |  {}",
        view.cursor + 1,
        view.batch_len,
        detail.image_url
    );

    if !detail.missing_ingredients.is_empty() {
        println!("\nMissing ingredients:");
        for ingredient in &detail.missing_ingredients {
            println!(
                "  - {} ({} {})",
                ingredient.name, ingredient.amount, ingredient.unit
            );
        }
    }

    if let Some(warning) = &view.warning {
        print_problem("\nInstructions unavailable", warning);
    } else if detail.steps.is_empty() {
        println!("\nNo instructions available.");
    } else {
        println!("\nInstructions:");
        for (number, step) in detail.steps.iter().enumerate() {
            println!("  {}. {step}", number + 1);
        }
    }

    println!("\n[{}]  (type `save`)", detail.save_button_label);
}

/// Cart table with its total row
pub fn print_cart(view: &CartView) {
    for failure in &view.pricing_failures {
        print_problem(&format!("Could not price {}", failure.name), &failure.error);
    }

    let Some(table) = view.table.as_ref().filter(|_| view.visible) else {
        println!("Your cart is empty.");
        return;
    };

    let name_width = table
        .rows_with_total()
        .map(|row| row.name.chars().count())
        .max()
        .unwrap_or(4)
        .max(4);
    let aisle_width = table
        .rows_with_total()
        .map(|row| row.aisle.chars().count())
        .max()
        .unwrap_or(5)
        .max(5);

    println!(
        "{:<name_width$}  {:<aisle_width$}  {:>8}",
        table.columns[0], table.columns[1], table.columns[2]
    );
    println!("{}", "-".repeat(name_width + aisle_width + 12));
    for row in &table.rows {
        println!(
            "{:<name_width$}  {:<aisle_width$}  {:>8.2}",
            row.name, row.aisle, row.cost
        );
    }
    println!("{}", "-".repeat(name_width + aisle_width + 12));
    println!(
        "{:<name_width$}  {:<aisle_width$}  {:>8.2}",
        table.total.name, table.total.aisle, table.total.cost
    );
}
