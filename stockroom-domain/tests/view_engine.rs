use chrono::NaiveDate;
use futures_util::StreamExt;
use std::sync::Arc;
use stockroom_domain::clock::FixedClock;
use stockroom_domain::form::FormInput;
use stockroom_domain::model::{Category, Customer, InventoryItem, StockStatus, derive_status};
use stockroom_domain::mutation::{IdStrategy, Mutation, MutationApplier, MutationOutcome};
use stockroom_domain::notify::{BroadcastNotifier, InMemoryNotifier, Notifier};
use stockroom_domain::persist::InMemoryRepository;
use stockroom_domain::record::Record;
use stockroom_domain::seed;
use stockroom_domain::sort::{SortDirection, SortState, sort_rows};
use stockroom_domain::specification::{FieldEquals, Specification, TextSearch, filter};
use stockroom_domain::summary;
use stockroom_domain::sync::SyncAdapter;
use stockroom_domain::value_object::{RecordId, usage_percent};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 5, 2).unwrap()
}

fn adapter<R: Record>(rows: Vec<R>, notifier: Arc<dyn Notifier>) -> SyncAdapter<R> {
    SyncAdapter::new(
        Arc::new(InMemoryRepository::seeded(rows)),
        MutationApplier::new(IdStrategy::Monotonic, Arc::new(FixedClock(today()))),
        notifier,
    )
}

fn ids<R: Record>(rows: &[R]) -> Vec<String> {
    rows.iter().map(|r| r.id().to_string()).collect()
}

#[test]
fn texas_facet_is_independent_of_query_order() {
    let customers = seed::customers();
    let texas = || FieldEquals::<Customer>::new("state", "Texas");

    let facet_only = filter(&customers, &texas());
    assert_eq!(ids(&facet_only), ["CUST-002", "CUST-007", "CUST-009", "CUST-014"]);

    let search_then_facet = TextSearch::<Customer>::new("").and(texas());
    let facet_then_search = texas().and(TextSearch::<Customer>::new(""));
    assert_eq!(filter(&customers, &search_then_facet), facet_only);
    assert_eq!(filter(&customers, &facet_then_search), facet_only);
}

#[test]
fn filtered_rows_are_a_subsequence() {
    let customers = seed::customers();
    let rows = filter(&customers, &TextSearch::<Customer>::new("an"));
    let mut cursor = customers.iter();
    for row in &rows {
        assert!(cursor.any(|c| c == row), "{} out of order", row.id);
    }
}

#[test]
fn sorting_filtered_rows_is_stable_and_idempotent() -> anyhow::Result<()> {
    let inventory = seed::inventory();
    let electronics = filter(&inventory, &FieldEquals::<InventoryItem>::new("category", "Electronics"));
    let state = SortState::new("quantity", SortDirection::Asc);

    let once = sort_rows(electronics.clone(), Some(&state))?;
    let twice = sort_rows(once.clone(), Some(&state))?;
    assert_eq!(once, twice);
    assert_eq!(ids(&once), ["INV-013", "INV-010", "INV-004", "INV-007", "INV-001"]);

    let mut toggled = state.clone();
    toggled.toggle("quantity");
    toggled.toggle("quantity");
    assert_eq!(sort_rows(electronics, Some(&toggled))?, once);
    Ok(())
}

#[test]
fn stock_status_thresholds() {
    assert_eq!(derive_status(Some(0)), StockStatus::OutOfStock);
    assert_eq!(derive_status(Some(15)), StockStatus::LowStock);
    assert_eq!(derive_status(Some(16)), StockStatus::InStock);
    assert_eq!(usage_percent(35_000, 50_000), Some(70));
}

#[test]
fn add_then_delete_restores_the_set() -> anyhow::Result<()> {
    let applier = MutationApplier::<Category>::new(IdStrategy::Monotonic, Arc::new(FixedClock(today())));
    let seeded = seed::categories();
    let mut rows = seeded.clone();
    applier.observe(&rows);

    let added = applier.apply(
        &mut rows,
        Mutation::Add {
            form: FormInput::new().with("name", "Sports2").with("items", "42"),
        },
    )?;
    let id = added.record().map(|r| r.id.clone()).unwrap_or_default();
    assert_eq!(id.as_str(), "CAT-011");

    let removed = applier.apply(&mut rows, Mutation::Delete { id })?;
    assert!(matches!(removed, MutationOutcome::Removed(Some(_))));
    assert_eq!(rows, seeded);
    Ok(())
}

#[tokio::test]
async fn category_add_keeps_items_numeric() -> anyhow::Result<()> {
    let notifier = Arc::new(InMemoryNotifier::new());
    let categories = adapter(seed::categories(), notifier.clone());
    categories.load().await?;

    let form = FormInput::new()
        .with("name", "Sports2")
        .with("description", "More sports")
        .with("items", "42");
    let added = categories.add(&form).await?;
    assert_eq!(added.id.as_str(), "CAT-011");
    assert_eq!(added.items, Some(42));
    assert_eq!(added.created_on, today());

    let json = serde_json::to_value(&added)?;
    assert_eq!(json["items"], serde_json::json!(42));

    let last = notifier.last().expect("notice");
    assert_eq!(last.title(), "Category added");
    Ok(())
}

#[tokio::test]
async fn editing_inventory_to_zero_marks_out_of_stock() -> anyhow::Result<()> {
    let notifier = Arc::new(InMemoryNotifier::new());
    let inventory = adapter(seed::inventory(), notifier.clone());
    inventory.load().await?;

    let id = RecordId::from("INV-002");
    let edited = inventory
        .edit(&id, &FormInput::new().with("quantity", "0"))
        .await?;
    assert_eq!(edited.status(), StockStatus::OutOfStock);
    assert_eq!(edited.last_updated, today());
    assert_eq!(edited.product, "Office Chair");

    let stored = inventory.store().find(&id).expect("still present");
    assert_eq!(stored, edited);

    let breakdown = summary::stock_breakdown(&inventory.store().list());
    assert_eq!(breakdown.count(StockStatus::OutOfStock), 3);
    assert_eq!(notifier.last().map(|n| n.title().to_string()).as_deref(), Some("Inventory updated"));
    Ok(())
}

#[tokio::test]
async fn deleted_ids_are_not_reused() -> anyhow::Result<()> {
    let customers = adapter(seed::customers(), Arc::new(InMemoryNotifier::new()));
    customers.load().await?;

    let removed = customers.delete(&RecordId::from("CUST-020")).await?;
    assert_eq!(removed.map(|c| c.name), Some("Susan Wright".to_string()));

    let added = customers.add(&FormInput::new().with("name", "Jane Roe")).await?;
    assert_eq!(added.id.as_str(), "CUST-021");
    assert_eq!(customers.store().len(), 20);
    Ok(())
}

#[tokio::test]
async fn broadcast_subscribers_see_outcomes() -> anyhow::Result<()> {
    let notifier = Arc::new(BroadcastNotifier::new(8));
    let mut stream = notifier.subscribe();
    let customers = adapter(seed::customers(), notifier.clone());
    customers.load().await?;

    customers.delete(&RecordId::from("CUST-001")).await?;
    let notice = stream.next().await.expect("stream open")?;
    assert_eq!(notice.title(), "Customer deleted");
    assert_eq!(notice.description(), "John Doe has been removed from the customer list.");
    Ok(())
}
