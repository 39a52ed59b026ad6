//! Catalog payload parsing and filter/sort behavior over a realistic
//! catalog.

use rust_decimal_macros::dec;
use shopsphere_core::Product;
use shopsphere_integration_tests::product;
use shopsphere_storefront::catalog::categories;
use shopsphere_storefront::catalog::filter::{CategoryFilter, SortMode, filter_and_sort};

fn catalog() -> Vec<Product> {
    vec![
        product(1, "Essence Mascara Lash Princess", dec!(9.99), "beauty", 5),
        product(2, "Eyeshadow Palette with Mirror", dec!(19.99), "beauty", 44),
        product(3, "Powder Canister", dec!(14.99), "beauty", 59),
        product(4, "Red Lipstick", dec!(12.99), "beauty", 68),
        product(5, "Calvin Klein CK One", dec!(49.99), "fragrances", 17),
        product(6, "Chanel Coco Noir Eau De", dec!(129.99), "fragrances", 58),
        product(7, "Annibale Colombo Bed", dec!(1899.99), "furniture", 88),
        product(8, "Knoll Saarinen Executive Conference Chair", dec!(499.99), "furniture", 47),
        product(9, "Apple", dec!(1.99), "groceries", 9),
        product(10, "Beef Steak", dec!(12.99), "groceries", 96),
    ]
}

// =============================================================================
// Payload parsing (the catalog endpoint's wire shape)
// =============================================================================

#[test]
fn products_parse_from_a_dummyjson_style_record() {
    let json = r#"{
        "id": 1,
        "title": "Essence Mascara Lash Princess",
        "description": "A popular mascara",
        "category": "beauty",
        "price": 9.99,
        "discountPercentage": 7.17,
        "rating": 4.94,
        "stock": 5,
        "tags": ["beauty", "mascara"],
        "brand": "Essence",
        "thumbnail": "https://cdn.dummyjson.com/products/images/beauty/thumbnail.png"
    }"#;

    let parsed: Product = serde_json::from_str(json).expect("parse");
    assert_eq!(parsed.title, "Essence Mascara Lash Princess");
    assert_eq!(parsed.price.amount(), dec!(9.99));
    assert_eq!(parsed.stock, 5);
}

// =============================================================================
// Filter laws
// =============================================================================

#[test]
fn search_and_category_compose() {
    let results = filter_and_sort(
        &catalog(),
        "red",
        &CategoryFilter::parse("beauty"),
        SortMode::Default,
    );
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].title, "Red Lipstick");
}

#[test]
fn category_with_zero_matches_returns_empty() {
    let results = filter_and_sort(
        &catalog(),
        "",
        &CategoryFilter::parse("vehicles"),
        SortMode::Default,
    );
    assert!(results.is_empty());
}

#[test]
fn low_sort_is_monotonically_non_decreasing() {
    let results = filter_and_sort(
        &catalog(),
        "",
        &CategoryFilter::All,
        SortMode::PriceLowToHigh,
    );
    assert_eq!(results.len(), catalog().len());
    for pair in results.windows(2) {
        assert!(pair[0].price <= pair[1].price);
    }
}

#[test]
fn equal_prices_keep_catalog_order_across_sorts() {
    // Red Lipstick (4) and Beef Steak (10) share a price
    let results = filter_and_sort(
        &catalog(),
        "",
        &CategoryFilter::All,
        SortMode::PriceLowToHigh,
    );
    let lipstick = results
        .iter()
        .position(|p| p.id.as_i64() == 4)
        .expect("lipstick present");
    let steak = results
        .iter()
        .position(|p| p.id.as_i64() == 10)
        .expect("steak present");
    assert!(lipstick < steak);
}

#[test]
fn filtering_is_idempotent() {
    let args = ("e", CategoryFilter::parse("fragrances"), SortMode::PriceHighToLow);
    let first = filter_and_sort(&catalog(), args.0, &args.1, args.2);
    let second = filter_and_sort(&first, args.0, &args.1, args.2);
    assert_eq!(first, second);
}

#[test]
fn clearing_filters_restores_catalog_order() {
    // The clear-filters action resets to ("", all, default), which must be
    // the identity over the catalog
    let results = filter_and_sort(&catalog(), "", &CategoryFilter::All, SortMode::Default);
    assert_eq!(results, catalog());
}

// =============================================================================
// Category enumeration
// =============================================================================

#[test]
fn categories_enumerate_in_catalog_order() {
    assert_eq!(
        categories(&catalog()),
        vec!["beauty", "fragrances", "furniture", "groceries"]
    );
}
