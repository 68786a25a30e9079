//! Text rendering for menu output. Pure functions over query results.

use std::fmt::Write;

use crate::catalog::{CatalogSummary, StockChange};
use crate::domain::Product;
use crate::messages::CategoryListing;

pub const EMPTY_INVENTORY: &str = "No products in inventory!";
pub const NOT_FOUND: &str = "Product not found!";

fn rule(ch: char, width: usize) -> String {
    ch.to_string().repeat(width)
}

fn banner(out: &mut String, width: usize, title: &str) {
    let _ = writeln!(out, "\n{}", rule('=', width));
    let _ = writeln!(out, "{title:^width$}");
    let _ = writeln!(out, "{}", rule('=', width));
}

pub fn menu() -> String {
    let mut out = String::new();
    banner(&mut out, 50, "INVENTORY MANAGEMENT SYSTEM");
    for line in [
        "1.  Add New Product",
        "2.  Remove Product",
        "3.  Update Stock",
        "4.  Search Products",
        "5.  Display All Products",
        "6.  Display by Category",
        "7.  View Products by Category",
        "8.  Generate Low Stock Report",
        "9.  Generate Inventory Summary",
        "10. Calculate Total Inventory Value",
        "11. Edit Product",
        "0.  Exit",
    ] {
        let _ = writeln!(out, "{line}");
    }
    let _ = writeln!(out, "{}", rule('=', 50));
    out
}

pub fn product_detail(product: &Product) -> String {
    format!(
        "Product ID: {}\nName: {}\nCategory: {}\nPrice: ${:.2}\nQuantity: {}\nSupplier: {}\nTotal Value: ${:.2}\n{}\n",
        product.id,
        product.name,
        product.category,
        product.price,
        product.quantity,
        product.supplier,
        product.total_value(),
        rule('-', 19),
    )
}

pub fn product_rows(products: &[Product]) -> String {
    products.iter().map(|product| format!("{product}\n")).collect()
}

pub fn inventory_list(products: &[Product]) -> String {
    if products.is_empty() {
        return format!("{EMPTY_INVENTORY}\n");
    }

    let mut out = String::new();
    banner(&mut out, 100, "INVENTORY LIST");
    out.push_str(&product_rows(products));
    let _ = writeln!(out, "{}", rule('=', 100));
    out
}

pub fn category_listing(listing: &[CategoryListing]) -> String {
    if listing.is_empty() {
        return format!("{EMPTY_INVENTORY}\n");
    }

    let mut out = String::new();
    banner(&mut out, 80, "PRODUCTS BY CATEGORY");
    for (category, products) in listing {
        let _ = writeln!(out, "\nCategory: {}", category.to_uppercase());
        let _ = writeln!(out, "{}", rule('-', 50));
        for product in products {
            let _ = writeln!(out, "  {product}");
        }
    }
    let _ = writeln!(out, "{}", rule('=', 80));
    out
}

pub fn low_stock_report(threshold: u32, products: &[Product]) -> String {
    if products.is_empty() {
        return "\nNo products are low in stock!\n".to_string();
    }

    let mut out = String::new();
    banner(&mut out, 80, &format!("LOW STOCK REPORT (Threshold: {threshold})"));
    for product in products {
        let _ = writeln!(out, " {product} (Quantity: {})", product.quantity);
    }
    let _ = writeln!(out, "{}", rule('=', 80));
    out
}

pub fn summary_report(summary: &CatalogSummary) -> String {
    if summary.product_count == 0 {
        return format!("{EMPTY_INVENTORY}\n");
    }

    let mut out = String::new();
    banner(&mut out, 60, "INVENTORY SUMMARY");
    let _ = writeln!(out, "Total Products: {}", summary.product_count);
    let _ = writeln!(out, "Total Categories: {}", summary.category_count);
    let _ = writeln!(out, "Total Inventory Value: ${:.2}", summary.total_value);
    let _ = writeln!(out, "\nCategory Breakdown:");
    for line in &summary.categories {
        let _ = writeln!(
            out,
            "  {}: {} products, ${:.2}",
            line.category, line.product_count, line.total_value
        );
    }
    let _ = writeln!(out, "{}", rule('=', 60));
    out
}

pub fn total_value(value: f64) -> String {
    format!("\nTotal Inventory Value: ${value:.2}\n")
}

pub fn stock_change(change: &StockChange) -> String {
    format!("Stock updated! {}: {} → {}\n", change.name, change.before, change.after)
}
