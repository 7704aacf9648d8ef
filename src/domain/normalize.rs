// src/domain/normalize.rs

use crate::domain::listing::{EstateAgent, Listing, ListingTable};
use crate::domain::rules::{
    extract_area, infer_bedrooms, parse_bed_count, parse_currency, AreaRule, CENTRAL_AREAS,
    CENTRAL_CURRENCY, FOXTONS_CURRENCY, STOW_BROS_CURRENCY,
};
use crate::scraper::models::{CentralListing, FoxtonsListing, RawListing, StowBrosListing};
use chrono::NaiveDate;
use tracing::{debug, warn};

/// Normalizes one source's raw records into the shared table shape.
///
/// Listings that cannot produce an address are dropped; every other
/// unreadable field becomes null. Nothing here aborts the batch.
pub fn normalize_source(agent: EstateAgent, raw: &[RawListing], today: NaiveDate) -> ListingTable {
    let rows: Vec<Listing> = raw
        .iter()
        .filter_map(|listing| {
            if listing.agent() != agent {
                warn!(
                    expected = %agent,
                    found = %listing.agent(),
                    "Skipping listing filed under the wrong source"
                );
                return None;
            }

            let row = normalize(listing, today);
            if row.is_none() {
                warn!(agent = %agent, ?listing, "Skipping listing without an address");
            }
            row
        })
        .collect();

    debug!(agent = %agent, scraped = raw.len(), kept = rows.len(), "Normalized source");
    ListingTable::new(agent, rows)
}

pub fn normalize(listing: &RawListing, today: NaiveDate) -> Option<Listing> {
    match listing {
        RawListing::Central(l) => normalize_central(l, today),
        RawListing::StowBros(l) => normalize_stow_bros(l, today),
        RawListing::Foxtons(l) => normalize_foxtons(l, today),
    }
}

fn normalize_central(raw: &CentralListing, today: NaiveDate) -> Option<Listing> {
    let address = non_empty(&raw.address)?;

    Some(Listing {
        update_date: today,
        area: extract_area(&address, AreaRule::Priority(&CENTRAL_AREAS)),
        num_beds: parse_bed_count(&raw.num_beds),
        cost_pcm: parse_currency(&raw.cost, &CENTRAL_CURRENCY),
        address,
        estate_agent: EstateAgent::Central,
        description: non_empty(&raw.description),
    })
}

fn normalize_stow_bros(raw: &StowBrosListing, today: NaiveDate) -> Option<Listing> {
    let address = non_empty(&raw.address)?;
    let description = raw.description.as_deref().and_then(non_empty);

    Some(Listing {
        update_date: today,
        area: extract_area(&address, AreaRule::LastPart),
        num_beds: description.as_deref().and_then(infer_bedrooms),
        cost_pcm: parse_currency(&raw.price, &STOW_BROS_CURRENCY),
        address,
        estate_agent: EstateAgent::StowBros,
        description,
    })
}

fn normalize_foxtons(raw: &FoxtonsListing, today: NaiveDate) -> Option<Listing> {
    let address = non_empty(&raw.address)?;

    Some(Listing {
        update_date: today,
        area: extract_area(&address, AreaRule::SecondPart),
        num_beds: parse_bed_count(&raw.num_beds),
        cost_pcm: parse_currency(&raw.cost, &FOXTONS_CURRENCY),
        address,
        estate_agent: EstateAgent::Foxtons,
        description: None,
    })
}

fn non_empty(s: &str) -> Option<String> {
    let trimmed = s.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::listing::LISTING_COLUMNS;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 14).unwrap()
    }

    fn central(address: &str, cost: &str, description: &str, beds: &str) -> RawListing {
        RawListing::Central(CentralListing {
            address: address.into(),
            cost: cost.into(),
            description: description.into(),
            num_beds: beds.into(),
            num_baths: "1".into(),
        })
    }

    #[test]
    fn central_row_is_fully_normalized() {
        let table = normalize_source(
            EstateAgent::Central,
            &[central(
                "14 High Road, Leytonstone, London, E11",
                "£950PCM, Fees Apply",
                "Two bedroom flat",
                "2",
            )],
            today(),
        );

        assert_eq!(table.rows.len(), 1);
        let row = &table.rows[0];
        assert_eq!(row.update_date, today());
        assert_eq!(row.area.as_deref(), Some("Leytonstone"));
        assert_eq!(row.num_beds, Some(2));
        assert_eq!(row.cost_pcm, Some(950));
        assert_eq!(row.address, "14 High Road, Leytonstone, London, E11");
        assert_eq!(row.estate_agent, EstateAgent::Central);
        assert_eq!(row.description.as_deref(), Some("Two bedroom flat"));
    }

    #[test]
    fn stow_bros_infers_beds_from_description() {
        let raw = RawListing::StowBros(StowBrosListing {
            address: "Hoe Street, Walthamstow".into(),
            price: "£1,200 pcm".into(),
            description: Some("Two double bedrooms, One study".into()),
        });

        let row = normalize(&raw, today()).unwrap();
        assert_eq!(row.num_beds, Some(2));
        assert_eq!(row.cost_pcm, Some(1200));
        assert_eq!(row.area.as_deref(), Some("Walthamstow"));
        assert_eq!(row.estate_agent.as_str(), "Stow Bros");
    }

    #[test]
    fn stow_bros_without_description_has_null_beds() {
        let raw = RawListing::StowBros(StowBrosListing {
            address: "Church Lane, Leyton".into(),
            price: "£1,050 pcm".into(),
            description: None,
        });

        let row = normalize(&raw, today()).unwrap();
        assert_eq!(row.num_beds, None);
        assert_eq!(row.description, None);
    }

    #[test]
    fn foxtons_takes_second_address_part_and_has_no_description() {
        let raw = RawListing::Foxtons(FoxtonsListing {
            address: "Grove Road, Leyton, E10".into(),
            cost: "£800.00 pcm".into(),
            num_beds: "1".into(),
        });

        let row = normalize(&raw, today()).unwrap();
        assert_eq!(row.area.as_deref(), Some("Leyton"));
        assert_eq!(row.cost_pcm, Some(800));
        assert_eq!(row.num_beds, Some(1));
        assert_eq!(row.description, None);
    }

    #[test]
    fn malformed_fields_null_fill_and_missing_address_drops() {
        let table = normalize_source(
            EstateAgent::Central,
            &[
                central("", "£1,000 pcm", "", "1"),
                central("3 Church Road, Wanstead", "", "", "beds"),
            ],
            today(),
        );

        assert_eq!(table.rows.len(), 1);
        let row = &table.rows[0];
        assert_eq!(row.area.as_deref(), Some("Wanstead"));
        assert_eq!(row.cost_pcm, None);
        assert_eq!(row.num_beds, None);
        assert_eq!(row.description, None);
    }

    #[test]
    fn mismatched_variants_are_skipped() {
        let stray = RawListing::Foxtons(FoxtonsListing {
            address: "Grove Road, Leyton".into(),
            cost: "£900 pcm".into(),
            num_beds: "1".into(),
        });

        let table = normalize_source(EstateAgent::Central, &[stray], today());
        assert_eq!(table.len(), 0);
    }

    #[test]
    fn every_source_emits_the_canonical_columns_even_when_empty() {
        for agent in [EstateAgent::Central, EstateAgent::StowBros, EstateAgent::Foxtons] {
            let table = normalize_source(agent, &[], today());
            assert_eq!(table.columns, LISTING_COLUMNS.to_vec());
            assert_eq!(table.len(), 0);
        }
    }
}
