use indexmap::IndexMap;

use super::*;

#[test]
fn record_fields_are_title_then_price() {
    let record = Record {
        title: "A Light in the Attic".to_owned(),
        price: "£51.77".to_owned(),
    };
    assert_eq!(
        record.fields(),
        vec![
            ("Title".to_owned(), "A Light in the Attic".to_owned()),
            ("Price".to_owned(), "£51.77".to_owned()),
        ]
    );
}

#[test]
fn rating_from_class_accepts_ordinal_vocabulary() {
    assert_eq!(Rating::from_class("One"), Some(Rating::One));
    assert_eq!(Rating::from_class("Three"), Some(Rating::Three));
    assert_eq!(Rating::from_class("Five"), Some(Rating::Five));
}

#[test]
fn rating_from_class_rejects_other_classes() {
    assert_eq!(Rating::from_class("star-rating"), None);
    assert_eq!(Rating::from_class("one"), None);
    assert_eq!(Rating::from_class(""), None);
}

#[test]
fn ratings_order_by_star_count() {
    assert!(Rating::One < Rating::Two);
    assert!(Rating::Four < Rating::Five);
}

#[test]
fn detail_fields_preserve_product_table_order() {
    let mut specs = IndexMap::new();
    specs.insert("UPC".to_owned(), "a897fe39b1053632".to_owned());
    specs.insert("Product Type".to_owned(), "Books".to_owned());
    specs.insert("Tax".to_owned(), "£0.00".to_owned());

    let detail = DetailRecord {
        title: "A Light in the Attic".to_owned(),
        price: "£51.77".to_owned(),
        availability: "In stock (22 available)".to_owned(),
        specs,
        description: None,
        rating: None,
    };

    let fields = detail.fields();
    let names: Vec<&str> = fields.iter().map(|(n, _)| n.as_str()).collect();
    assert_eq!(
        names,
        vec!["Title", "Price", "Availability", "UPC", "Product Type", "Tax"]
    );
}

#[test]
fn detail_fields_include_optionals_only_when_present() {
    let detail = DetailRecord {
        title: "Soumission".to_owned(),
        price: "£50.10".to_owned(),
        availability: "In stock".to_owned(),
        specs: IndexMap::new(),
        description: Some("A novel.".to_owned()),
        rating: Some(Rating::Four),
    };

    let fields = detail.fields();
    assert!(fields.contains(&("Description".to_owned(), "A novel.".to_owned())));
    assert!(fields.contains(&("Rating".to_owned(), "Four".to_owned())));

    let bare = DetailRecord {
        description: None,
        rating: None,
        ..detail
    };
    let bare_fields = bare.fields();
    let names: Vec<&str> = bare_fields.iter().map(|(n, _)| n.as_str()).collect();
    assert!(!names.contains(&"Description"));
    assert!(!names.contains(&"Rating"));
}
