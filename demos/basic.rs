//! Mapping a versioned JSON payload into plain structs.
//!
//! Run with: cargo run --example basic

use chrono::FixedOffset;
use std::error::Error;
use tagmap::{from_str, map, tagmap, Document, MapOptions, Timestamp};

tagmap! {
    #[derive(Debug, Default)]
    struct Address {
        street: String => ("street", v2 = "line1"),
        city: String => "city",
    }
}

tagmap! {
    #[derive(Debug, Default)]
    struct Customer {
        id: u64 => ("customer.id", v2 = "id"),
        name: String => ("customer.name", v2 = "display_name"),
        email: Option<String> => ("customer.email", v2 = "contact.email"),
        signed_up: Timestamp => ("customer.signed_up", v2 = "created"),
        last_seen: Option<Timestamp> => ("customer.last_seen", v2 = "seen"),
        address: Address => ("customer.address", v2 = "location"),
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let v1 = r#"{
        "customer": {
            "id": 42,
            "name": "Alice Johnson",
            "email": null,
            "signed_up": "03/14/2021 09:30:00",
            "last_seen": "sometime",
            "address": { "street": "1 Main St", "city": "Springfield" }
        }
    }"#;

    let (customer, report) = from_str::<Customer, _>(v1, &MapOptions::new())?;
    println!("v1 payload:\n{:#?}\n", customer);
    for fault in report.faults() {
        println!("  fault: {}", fault);
    }

    // same structs, newer payload shape, civil times in UTC+2
    let v2 = Document::from_str(
        r#"{
            "id": 43,
            "display_name": "Bob Smith",
            "contact": { "email": "bob@example.com" },
            "created": "2022-07",
            "location": { "line1": "9 Side Rd", "city": "Shelbyville" }
        }"#,
    )?;
    let zone = FixedOffset::east_opt(2 * 3600).ok_or("invalid offset")?;
    let options = MapOptions::new()
        .with_zone(zone)
        .with_namespace("v2")
        .with_propagation(true);

    let mut customer = Customer::default();
    let report = map(&v2, &mut customer, &options)?;
    println!("v2 payload:\n{:#?}", customer);
    println!("clean: {}", report.is_clean());

    Ok(())
}
