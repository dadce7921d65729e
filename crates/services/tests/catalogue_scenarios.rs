use chrono::{Datelike, Local, NaiveDate};
use rust_decimal::Decimal;

use museum_catalog::{
    Artist, ArtifactDetails, Category, Item, ItemRecord, ItemStatus, Location, PaintingDetails,
};
use museum_core::{DomainError, DomainResult, Entity};
use museum_services::{CatalogSource, InMemoryCatalog, Museum, MuseumConfig};

fn museum() -> Museum {
    museum_observability::init();
    Museum::new(MuseumConfig::default())
}

fn year() -> i32 {
    Local::now().year()
}

#[test]
fn night_painting_gets_first_inventory_number() {
    let museum = museum();
    let category = museum
        .categories()
        .add_category(Category::new("Painting", "PTG"))
        .unwrap();
    let artist = museum
        .artists()
        .add_artist(Artist::new("Vincent van Gogh", 1853, "Netherlands").with_death_year(1890))
        .unwrap();
    museum.inventory_numbers().reset();

    let night = Item::painting(
        "Night",
        category.id(),
        PaintingDetails::new("Oil on canvas", 92, 73),
    )
    .with_author(artist.id().unwrap());
    let stored = museum.exhibits().add_exhibit(night).unwrap();

    assert!(stored.id().is_some());
    assert_eq!(stored.status, ItemStatus::InStorage);
    assert_eq!(stored.inventory_number, format!("MUS-PTG-{}-000001", year()));
    assert_eq!(stored.author(), artist.id());
}

#[test]
fn csv_export_of_two_items_has_three_lines() {
    let museum = museum();
    let category = museum
        .categories()
        .add_category(Category::new("Artifacts", "ART"))
        .unwrap();
    let details = ArtifactDetails {
        origin: "Egypt".to_string(),
        period: "New Kingdom, 18th dynasty".to_string(),
        material: "Faience".to_string(),
        age: 3400.0,
    };
    museum
        .exhibits()
        .add_exhibit(Item::artifact("Amulet, scarab", category.id(), details))
        .unwrap();
    museum
        .exhibits()
        .add_exhibit(Item::general_exhibit("Vase", category.id()))
        .unwrap();

    let report = museum.report_service();
    let csv = report.export_to_csv(&museum.exhibits().get_all_exhibits());
    let lines: Vec<&str> = csv.lines().collect();

    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], "ID,Name,Type,Status,InventoryNumber");
    // The quoted name carries its own comma; count fields outside quotes.
    for row in &lines[1..] {
        assert_eq!(count_fields(row), 5, "row: {row}");
    }
}

fn count_fields(row: &str) -> usize {
    let mut in_quotes = false;
    let mut fields = 1;
    for c in row.chars() {
        match c {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => fields += 1,
            _ => {}
        }
    }
    fields
}

#[test]
fn duplicate_inventory_number_is_rejected_without_side_effects() {
    let museum = museum();
    let category = museum
        .categories()
        .add_category(Category::new("Painting", "PTG"))
        .unwrap();
    museum
        .exhibits()
        .add_exhibit(Item::general_exhibit("First", category.id()).with_inventory_number("INV-7"))
        .unwrap();

    let before = museum.exhibits().get_total_count();
    let err = museum
        .exhibits()
        .add_exhibit(Item::general_exhibit("Second", category.id()).with_inventory_number("INV-7"))
        .unwrap_err();

    assert_eq!(err, DomainError::DuplicateInventoryNumber("INV-7".to_string()));
    assert_eq!(museum.exhibits().get_total_count(), before);
}

#[test]
fn ids_are_unique_over_the_repository_lifetime() {
    let museum = museum();
    let category = museum
        .categories()
        .add_category(Category::new("Painting", "PTG"))
        .unwrap();

    let mut seen = Vec::new();
    for round in 0..5 {
        let stored = museum
            .exhibits()
            .add_exhibit(Item::general_exhibit(format!("Item {round}"), category.id()))
            .unwrap();
        let id = stored.id().unwrap();
        assert!(!seen.contains(&id));
        seen.push(id);
        if round % 2 == 0 {
            museum.exhibits().delete_exhibit(id).unwrap();
        }
    }
}

#[test]
fn advanced_search_matches_service_filters() {
    let museum = museum();
    let painting = museum
        .categories()
        .add_category(Category::new("Painting", "PTG"))
        .unwrap()
        .id();
    let ceramics = museum
        .categories()
        .add_category(Category::new("Ceramics", "CER"))
        .unwrap()
        .id();

    for (name, category, status) in [
        ("Dawn", painting, ItemStatus::OnDisplay),
        ("Dusk", painting, ItemStatus::InStorage),
        ("Bowl", ceramics, ItemStatus::OnDisplay),
        ("Jug", painting, ItemStatus::OnDisplay),
    ] {
        museum
            .exhibits()
            .add_exhibit(Item::general_exhibit(name, category).with_status(status))
            .unwrap();
    }

    let search = museum.search_service();
    let result = search.advanced_search(None, painting, None, Some(ItemStatus::OnDisplay));

    let by_status = museum.exhibits().filter_by_status(Some(ItemStatus::OnDisplay));
    let expected: Vec<Item> = museum
        .exhibits()
        .filter_by_category(painting)
        .into_iter()
        .filter(|item| by_status.contains(item))
        .collect();

    assert_eq!(result, expected);
    assert_eq!(
        result.iter().map(|i| i.name.as_str()).collect::<Vec<_>>(),
        vec!["Dawn", "Jug"]
    );
}

#[test]
fn search_snapshot_does_not_follow_repository() {
    let museum = museum();
    let category = museum
        .categories()
        .add_category(Category::new("Painting", "PTG"))
        .unwrap();
    let mut search = museum.search_service();

    museum
        .exhibits()
        .add_exhibit(Item::general_exhibit("Late arrival", category.id()))
        .unwrap();
    assert!(search.search("").is_empty());

    search.update_exhibits(museum.exhibits().get_all_exhibits());
    assert_eq!(search.search("").len(), 1);
}

struct BrokenExhibits {
    categories: Vec<Category>,
}

impl CatalogSource for BrokenExhibits {
    fn load_categories(&self) -> DomainResult<Vec<Category>> {
        Ok(self.categories.clone())
    }

    fn load_artists(&self) -> DomainResult<Vec<Artist>> {
        Err(DomainError::load("artists.json: permission denied"))
    }

    fn load_exhibits(&self) -> DomainResult<Vec<Item>> {
        Err(DomainError::load("exhibits.json: unexpected end of input"))
    }
}

#[test]
fn load_failure_degrades_to_empty_state() {
    let mut sculpture = Category::new("Sculpture", "SCL");
    sculpture.assign_id(4u64.into());
    let museum = museum();

    let summary = museum.load(&BrokenExhibits {
        categories: vec![sculpture],
    });

    assert_eq!(summary.categories, 1);
    assert_eq!(summary.artists, 0);
    assert_eq!(summary.items, 0);
    assert_eq!(museum.exhibits().get_total_count(), 0);

    // The museum keeps working after the failed load.
    let stored = museum
        .exhibits()
        .add_exhibit(Item::general_exhibit("Torso", Some(4u64.into())))
        .unwrap();
    assert_eq!(stored.inventory_number, format!("MUS-SCL-{}-000001", year()));
}

#[test]
fn persist_and_reload_restores_ids_and_counters() {
    let first = museum();
    let category = first
        .categories()
        .add_category(Category::new("Painting", "PTG"))
        .unwrap();
    let artist = first
        .artists()
        .add_artist(Artist::new("Claude Monet", 1840, "France").with_death_year(1926))
        .unwrap();
    let acquired = NaiveDate::from_ymd_opt(1999, 3, 14).unwrap();
    let hall = Location::new("Hall 2", "D-14", 6).unwrap();

    for name in ["Water Lilies", "Haystacks"] {
        first
            .exhibits()
            .add_exhibit(
                Item::painting(name, category.id(), PaintingDetails::new("Oil", 100, 80))
                    .with_author(artist.id().unwrap())
                    .with_location(hall.clone())
                    .with_estimated_value(Decimal::new(125_000_000, 2))
                    .with_acquisition_date(acquired),
            )
            .unwrap();
    }

    let catalog = InMemoryCatalog::new();
    first.persist(&catalog).unwrap();
    assert!(catalog.records().iter().all(|r| r.estimated_value.is_some()));

    let second = museum();
    let summary = second.load(&catalog);
    assert_eq!(summary.items, 2);
    assert_eq!(second.exhibits().get_all_exhibits(), first.exhibits().get_all_exhibits());

    // New ids and numbers continue after the restored ones.
    let next = second
        .exhibits()
        .add_exhibit(Item::general_exhibit("Sketch", category.id()))
        .unwrap();
    assert_eq!(next.id(), Some(3u64.into()));
    assert_eq!(next.inventory_number, format!("MUS-PTG-{}-000003", year()));
}

#[test]
fn malformed_record_fails_the_whole_item_load() {
    let mut record = ItemRecord::from(&Item::painting(
        "Unframed",
        Some(1u64.into()),
        PaintingDetails::new("Tempera", 30, 20),
    ));
    record.technique = None;

    let museum = museum();
    let summary = museum.load(&InMemoryCatalog::with_records(
        vec![Category::new("Painting", "PTG")],
        Vec::new(),
        vec![record],
    ));

    assert_eq!(summary.categories, 1);
    assert_eq!(summary.items, 0);
    assert_eq!(museum.exhibits().get_total_count(), 0);
}

#[test]
fn custom_prefix_from_config() {
    museum_observability::init();
    let museum = Museum::new(MuseumConfig {
        inventory_prefix: "NMK".to_string(),
        fallback_category_code: "MISC".to_string(),
    });
    let category = museum
        .categories()
        .add_category(Category::new("Uncoded", ""))
        .unwrap();

    let stored = museum
        .exhibits()
        .add_exhibit(Item::general_exhibit("Mystery box", category.id()))
        .unwrap();
    assert_eq!(stored.inventory_number, format!("NMK-MISC-{}-000001", year()));
}

fn vase_record(number: &str) -> ItemRecord {
    ItemRecord::from(
        &Item::general_exhibit("Vase", Some(1u64.into())).with_inventory_number(number),
    )
}

#[test]
fn repeated_inventory_number_fails_the_item_load() {
    let museum = museum();
    let summary = museum.load(&InMemoryCatalog::with_records(
        vec![Category::new("Ceramics", "CER")],
        Vec::new(),
        vec![vase_record("DUP-1"), vase_record("DUP-1")],
    ));

    assert_eq!(summary.items, 0);
    assert_eq!(museum.exhibits().get_total_count(), 0);
    assert!(museum.exhibits().find_by_inventory_number("DUP-1").is_none());
}

#[test]
fn item_breaking_field_rules_fails_the_item_load() {
    let mut blank = vase_record("INV-1");
    blank.name = "  ".to_string();
    let flat = ItemRecord::from(
        &Item::painting("Flat", Some(1u64.into()), PaintingDetails::new("Oil", 0, 0))
            .with_inventory_number("INV-2"),
    );

    for bad in [blank, flat] {
        let museum = museum();
        let summary = museum.load(&InMemoryCatalog::with_records(
            Vec::new(),
            Vec::new(),
            vec![vase_record("INV-0"), bad],
        ));
        assert_eq!(summary.items, 0);
        assert_eq!(museum.exhibits().get_total_count(), 0);
    }
}

#[test]
fn records_without_ids_never_take_a_loaded_id() {
    let mut sculpture = Category::new("Sculpture", "SCL");
    sculpture.assign_id(1u64.into());

    let museum = museum();
    let summary = museum.load(&InMemoryCatalog::with_records(
        vec![Category::new("Painting", "PTG"), sculpture],
        Vec::new(),
        Vec::new(),
    ));

    assert_eq!(summary.categories, 2);
    assert_eq!(museum.categories().get_total_count(), 2);
    assert_eq!(museum.categories().get_category(1u64.into()).unwrap().name, "Sculpture");
    assert_eq!(museum.categories().get_category(2u64.into()).unwrap().name, "Painting");
}
