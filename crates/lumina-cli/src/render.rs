//! Terminal rendering of storefront views.

use colored::Colorize;
use lumina_core::catalog::{Category, Product, SIZES, TAGLINE};
use lumina_core::linking::Segment;
use lumina_core::session::{ConversationMessage, MessageRole};
use lumina_core::storefront::{Page, Storefront};
use strum::IntoEnumIterator;

fn product_line(storefront: &Storefront, product: &Product) -> String {
    let heart = if storefront.is_wishlisted(&product.id) {
        " ♥".bright_red().to_string()
    } else {
        String::new()
    };
    format!(
        "  {} {}  {}  {}{}",
        format!("[{}]", product.id).bright_black(),
        product.name.bold(),
        product.price.bright_green(),
        product.category.label().bright_black(),
        heart
    )
}

fn product_list(storefront: &Storefront, products: &[&Product]) {
    for product in products {
        println!("{}", product_line(storefront, product));
    }
}

pub fn page(storefront: &Storefront) {
    match storefront.state().page {
        Page::Home => home(storefront),
        Page::Shop => shop(storefront),
        Page::Wishlist => wishlist(storefront),
        Page::About => about(storefront),
    }
}

fn home(storefront: &Storefront) {
    println!("{}", storefront.brand_name().bright_magenta().bold());
    println!("{}", TAGLINE.italic());
    println!();
    println!("{}", "New Arrivals".bold());
    let arrivals: Vec<&Product> = storefront.new_arrivals().iter().collect();
    product_list(storefront, &arrivals);
}

fn shop(storefront: &Storefront) {
    let filters = &storefront.state().filters;
    if filters.is_empty() {
        println!("{}", "Shop: all products".bold());
    } else {
        let mut active = Vec::new();
        active.extend(filters.categories.iter().map(|c| c.label().to_string()));
        active.extend(filters.sizes.iter().cloned());
        active.extend(filters.colors.iter().cloned());
        println!(
            "{} {}",
            "Shop:".bold(),
            format!("filters ({}): {}", filters.active_count(), active.join(", ")).yellow()
        );
    }

    let products = storefront.filtered_products();
    if products.is_empty() {
        println!("{}", "  No products match these filters. Try /clear.".bright_black());
    } else {
        product_list(storefront, &products);
    }
}

fn wishlist(storefront: &Storefront) {
    println!("{}", "Your Wishlist".bold());
    let products = storefront.wishlisted_products();
    if products.is_empty() {
        println!(
            "{}",
            "  Your wishlist is empty. Use /wish <id> to save favorites.".bright_black()
        );
    } else {
        product_list(storefront, &products);
    }
}

fn about(storefront: &Storefront) {
    println!("{}", storefront.brand_name().bright_magenta().bold());
    println!("{}", TAGLINE.italic());
    println!(
        "Ask the stylist anything by typing a message. Product names in replies are highlighted; open one with /view <name>."
    );
}

/// The open product view with its recommendations.
pub fn product(storefront: &Storefront) {
    let Some(product) = storefront.selected_product() else {
        println!("{}", "No product is open. Use /view <id|name>.".bright_black());
        return;
    };

    let heart = if storefront.is_wishlisted(&product.id) {
        "♥ in your wishlist".bright_red().to_string()
    } else {
        "/wish to save".bright_black().to_string()
    };

    println!("{}  {}", product.name.bright_magenta().bold(), heart);
    println!("{}  {}", product.price.bright_green(), product.category.label());
    println!("{}", product.description);
    println!("{} {}", "Fabric:".bold(), product.fabric);
    println!("{} {}", "Care:".bold(), product.care);
    println!("{} {}", "Colors:".bold(), product.colors.join(", "));
    println!("{} {}", "Sizes:".bold(), SIZES.join(" / "));

    recommendations(storefront);
}

pub fn recommendations(storefront: &Storefront) {
    let recs = storefront.recommendations();
    if recs.is_empty() {
        return;
    }
    println!();
    println!("{}", "Complete the look".bold());
    product_list(storefront, &recs);
}

/// A stylist reply with product mentions highlighted.
pub fn reply(segments: &[Segment]) {
    let mut out = String::new();
    for segment in segments {
        match segment {
            Segment::Text { text } => out.push_str(&text.bright_blue().to_string()),
            Segment::Product { product_id, text } => {
                out.push_str(&text.bright_magenta().bold().underline().to_string());
                out.push_str(&format!("[{product_id}]").bright_black().to_string());
            }
        }
    }
    println!("{out}");
}

pub fn history(storefront: &Storefront, turns: &[ConversationMessage]) {
    for turn in turns {
        match turn.role {
            MessageRole::User => println!("{}", format!("> {}", turn.content).green()),
            MessageRole::Assistant => reply(&storefront.segment(&turn.content)),
        }
    }
}

pub fn help() {
    let rows = [
        ("/home", "New arrivals"),
        ("/shop", "Browse with the current filters"),
        ("/wishlist", "Saved favorites"),
        ("/about", "About the brand"),
        ("/view <id|name>", "Open a product"),
        ("/close", "Close the product view"),
        ("/wish <id>", "Add or remove a favorite"),
        ("/category <label>", "Toggle a category filter"),
        ("/size <size>", "Toggle a size filter"),
        ("/color <name>", "Toggle a color filter"),
        ("/clear", "Clear all filters"),
        ("/recs", "Recommendations for the open product"),
        ("/order [size] [color]", "Order inquiry for the open product"),
        ("/history", "Conversation so far"),
        ("/quit", "Exit"),
    ];
    for (command, description) in rows {
        println!("  {:<24}{}", command.bright_cyan(), description);
    }
    let labels: Vec<&str> = Category::iter().map(|c| c.label()).collect();
    println!("{} {}", "Categories:".bright_black(), labels.join(", ").bright_black());
    println!("{}", "Any other text is sent to your personal stylist.".bright_black());
}
