use futures_util::StreamExt;
use std::sync::Arc;
use std::time::Duration;
use stockroom_application::command::{AddRecord, EditRecord};
use stockroom_application::command_bus::CommandBus;
use stockroom_application::context::AppContext;
use stockroom_application::query::{FacetValues, ListRecords};
use stockroom_application::query_bus::QueryBus;
use stockroom_application::telemetry;
use stockroom_application::{StockroomConfig, Workspace};
use stockroom_domain::form::FormInput;
use stockroom_domain::model::{Category, Customer, InventoryItem, Order, Warehouse};
use stockroom_domain::notify::BroadcastNotifier;
use stockroom_domain::record::Record;
use stockroom_domain::reports;
use stockroom_domain::summary::share_labels;
use stockroom_domain::value_object::RecordId;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = StockroomConfig::load()?;
    telemetry::init_tracing(&config.log_level, config.log_json);

    let notifier = Arc::new(BroadcastNotifier::new(64));
    let mut notices = notifier.subscribe();
    let printer = tokio::spawn(async move {
        while let Some(notice) = notices.next().await {
            match notice {
                Ok(n) if n.is_error() => println!("  [!] {}: {}", n.title(), n.description()),
                Ok(n) => println!("  [i] {}: {}", n.title(), n.description()),
                Err(err) => println!("  [?] notification stream lagged: {err}"),
            }
        }
    });

    let ws = Workspace::new(&config, notifier.clone())?;
    let failed = ws.load_all().await;
    if !failed.is_empty() {
        println!("tables that failed to load: {failed:?}");
    }

    let ctx = AppContext::builder()
        .correlation_id("demo")
        .actor_id("admin")
        .build();

    // 客户：按州过滤，再叠加文本搜索
    println!("== customers in Texas ==");
    let texas = ws
        .queries()
        .dispatch(&ctx, ListRecords::<Customer>::all().facet("state", "Texas"))
        .await?;
    for c in &texas.rows {
        println!("  {} {} ({})", c.id, c.name, c.city);
    }
    println!("  {} of {} customers", texas.matched(), texas.total);

    let mut view = ws.view::<Customer>();
    view.set_facet("state", "Texas")?;
    view.set_query("san");
    let san = view.rows()?;
    println!("  + query \"san\": {:?}", san.iter().map(|c| c.name.as_str()).collect::<Vec<_>>());

    // 分类：新增后按默认排序列出
    println!("== add category ==");
    let form = FormInput::new()
        .with("name", "Sports2")
        .with("description", "More sports")
        .with("items", "42");
    ws.commands()
        .dispatch(&ctx, AddRecord::<Category>::new(form))
        .await?;
    let categories = ws
        .queries()
        .dispatch(&ctx, ListRecords::<Category>::all())
        .await?;
    for c in categories.rows.iter().take(3) {
        println!("  {} {:<14} items={:?}", c.id, c.name, c.items);
    }
    if let Some(added) = categories.rows.iter().find(|c| c.name == "Sports2") {
        println!("  as json: {}", serde_json::to_string(added)?);
    }

    // 库存：数量改为 0，状态随之变为缺货
    println!("== edit inventory ==");
    let inv = RecordId::from("INV-002");
    ws.commands()
        .dispatch(
            &ctx,
            EditRecord::<InventoryItem>::new(inv.clone(), FormInput::new().with("quantity", "0")),
        )
        .await?;
    if let Some(item) = ws.adapter::<InventoryItem>().store().find(&inv) {
        println!("  {} {} -> {} ({})", item.id, item.product, item.status(), item.last_updated);
    }

    // 仓库：按使用率排序，点两次表头
    println!("== warehouses by usage ==");
    let mut warehouses = ws.view::<Warehouse>();
    warehouses.toggle_sort("usage")?;
    for w in warehouses.rows()? {
        println!("  {} {:<24} {:?}%", w.id, w.name, w.usage_percent());
    }
    warehouses.toggle_sort("usage")?;
    let least = warehouses.rows()?;
    println!("  least used: {}", least.first().map(|w| w.name.as_str()).unwrap_or("-"));

    let states = ws
        .queries()
        .dispatch(&ctx, FacetValues::<Warehouse>::new("state"))
        .await?;
    println!("  states: {}", states.values.join(", "));

    // 订单 → 客户
    println!("== orders ==");
    for order in ws.adapter::<Order>().store().list() {
        let customer = ws.order_customer(&order.id)?;
        println!(
            "  {} {:<16} {:<10} {:?} customer record: {}",
            order.id,
            order.customer,
            order.status,
            order.total,
            customer.map_or("-".to_string(), |c| c.id.to_string())
        );
    }

    println!("== dashboard ==");
    let dashboard = ws.dashboard();
    println!("{}", serde_json::to_string_pretty(&dashboard)?);
    println!("  departments: {}", share_labels(&dashboard.headcount).join(", "));

    println!("== reports ==");
    let value = reports::inventory_value_report();
    for row in &value.rows {
        println!("  {:<12} {:>8} {}%", row.category, row.value, row.percentage);
    }
    println!("  average turnover: {}", reports::average_turnover().unwrap_or_default());
    for (category, rate, band) in reports::category_turnover_bands() {
        println!("  {category:<12} {rate} {}", band.as_str());
    }
    let low = reports::low_stock_report(&reports::LOW_STOCK_ITEMS);
    println!("  low stock: {} items, average on hand {}", low.items, low.average_current);
    println!("  customers: {:?}", reports::cumulative_customers(&reports::CUSTOMER_ACQUISITION));
    println!("  regions: {}", reports::geographic_labels().join(", "));

    info!(table = Customer::schema().table, "demo finished");

    // 让打印任务把剩余通知输出完
    tokio::time::sleep(Duration::from_millis(50)).await;
    drop(ws);
    drop(notifier);
    printer.abort();
    Ok(())
}
