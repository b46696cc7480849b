//! 工作区（Workspace）
//!
//! 持有全部八类记录的同步适配器，并把它们注册到命令/查询总线上。
//! 各适配器的本地存储以 `Arc` 共享，订单可据此按姓名找到客户。
//!
//! 仓储选择：
//! - 商品：配置了 `remote` 且启用 `remote` feature 时走 PostgREST；否则为空的内存仓储；
//! - 其余记录：以种子数据初始化的内存仓储，本地缓存在构造时即预热。
//!
//! 远端商品表要到 [`Workspace::load_all`] 之后才有数据。
//!
use crate::command::{AddRecord, DeleteRecord, EditRecord};
use crate::config::StockroomConfig;
use crate::dto::Dto;
use crate::error::AppResult;
use crate::handlers::RecordHandler;
use crate::inmemory_command_bus::InMemoryCommandBus;
use crate::inmemory_query_bus::InMemoryQueryBus;
use crate::query::{FacetValues, ListRecords};
use crate::view::RecordView;
use serde::Serialize;
use std::sync::Arc;
use stockroom_domain::clock::{Clock, SystemClock};
use stockroom_domain::error::DomainError;
use stockroom_domain::model::{
    Category, Customer, Employee, InventoryItem, Order, Product, Supplier, Warehouse,
};
use stockroom_domain::mutation::MutationApplier;
use stockroom_domain::notify::Notifier;
use stockroom_domain::persist::{InMemoryRepository, RecordRepository};
use stockroom_domain::record::Record;
use stockroom_domain::seed;
use stockroom_domain::summary::{
    self, CategoryTotals, Share, StatusTotal, StockBreakdown, SupplierActivity,
    WarehouseUtilization,
};
use stockroom_domain::sync::SyncAdapter;
use stockroom_domain::value_object::RecordId;
use tracing::{info, warn};

/// 工作区中可按类型取得适配器的记录
pub trait Tabled: Record {
    fn adapter(workspace: &Workspace) -> &Arc<SyncAdapter<Self>>;
}

macro_rules! tabled {
    ($($ty:ty => $field:ident),* $(,)?) => {
        $(
            impl Tabled for $ty {
                fn adapter(workspace: &Workspace) -> &Arc<SyncAdapter<Self>> {
                    &workspace.$field
                }
            }
        )*
    };
}

tabled! {
    Category => categories,
    Customer => customers,
    Employee => employees,
    InventoryItem => inventory,
    Order => orders,
    Product => products,
    Supplier => suppliers,
    Warehouse => warehouses,
}

/// 首页概览
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    pub stock: StockBreakdown,
    pub categories: CategoryTotals,
    pub warehouses: WarehouseUtilization,
    pub orders: Vec<StatusTotal>,
    pub headcount: Vec<Share>,
    pub suppliers: SupplierActivity,
}

impl Dto for Dashboard {}

pub struct Workspace {
    categories: Arc<SyncAdapter<Category>>,
    customers: Arc<SyncAdapter<Customer>>,
    employees: Arc<SyncAdapter<Employee>>,
    inventory: Arc<SyncAdapter<InventoryItem>>,
    orders: Arc<SyncAdapter<Order>>,
    products: Arc<SyncAdapter<Product>>,
    suppliers: Arc<SyncAdapter<Supplier>>,
    warehouses: Arc<SyncAdapter<Warehouse>>,
    commands: Arc<InMemoryCommandBus>,
    queries: Arc<InMemoryQueryBus>,
}

struct Wiring<'a> {
    config: &'a StockroomConfig,
    clock: Arc<dyn Clock>,
    notifier: Arc<dyn Notifier>,
    commands: &'a InMemoryCommandBus,
    queries: &'a InMemoryQueryBus,
}

impl Wiring<'_> {
    fn seeded<R: Record>(&self, rows: Vec<R>) -> AppResult<Arc<SyncAdapter<R>>> {
        let adapter = self.table(Arc::new(InMemoryRepository::seeded(rows.clone())))?;
        adapter.prime(rows);
        Ok(adapter)
    }

    /// 建适配器并注册五个处理器（三个命令、两个查询）
    fn table<R: Record>(
        &self,
        repository: Arc<dyn RecordRepository<R>>,
    ) -> AppResult<Arc<SyncAdapter<R>>> {
        let applier = MutationApplier::new(self.config.id_strategy, self.clock.clone())
            .strict(self.config.strict_forms);
        let adapter = Arc::new(SyncAdapter::new(repository, applier, self.notifier.clone()));

        let handler = Arc::new(RecordHandler::new(adapter.clone()));
        self.commands.register::<AddRecord<R>, _>(handler.clone())?;
        self.commands.register::<EditRecord<R>, _>(handler.clone())?;
        self.commands.register::<DeleteRecord<R>, _>(handler.clone())?;
        self.queries.register::<ListRecords<R>, _>(handler.clone())?;
        self.queries.register::<FacetValues<R>, _>(handler)?;
        Ok(adapter)
    }

    fn products(&self) -> AppResult<Arc<SyncAdapter<Product>>> {
        let repository: Arc<dyn RecordRepository<Product>> = match &self.config.remote {
            #[cfg(feature = "remote")]
            Some(remote) => {
                info!(url = %remote.url, "products backed by remote table");
                Arc::new(stockroom_domain::persist::PostgrestRepository::<Product>::new(remote)?)
            }
            #[cfg(not(feature = "remote"))]
            Some(_) => {
                warn!("remote configured but the `remote` feature is disabled; products stay local");
                Arc::new(InMemoryRepository::new())
            }
            None => Arc::new(InMemoryRepository::new()),
        };
        self.table(repository)
    }
}

impl Workspace {
    pub fn new(config: &StockroomConfig, notifier: Arc<dyn Notifier>) -> AppResult<Self> {
        Self::with_clock(config, notifier, Arc::new(SystemClock))
    }

    pub fn with_clock(
        config: &StockroomConfig,
        notifier: Arc<dyn Notifier>,
        clock: Arc<dyn Clock>,
    ) -> AppResult<Self> {
        let commands = Arc::new(InMemoryCommandBus::new());
        let queries = Arc::new(InMemoryQueryBus::new());
        let wiring = Wiring {
            config,
            clock,
            notifier,
            commands: &commands,
            queries: &queries,
        };

        let workspace = Self {
            categories: wiring.seeded(seed::categories())?,
            customers: wiring.seeded(seed::customers())?,
            employees: wiring.seeded(seed::employees())?,
            inventory: wiring.seeded(seed::inventory())?,
            orders: wiring.seeded(seed::orders())?,
            products: wiring.products()?,
            suppliers: wiring.seeded(seed::suppliers())?,
            warehouses: wiring.seeded(seed::warehouses())?,
            commands,
            queries,
        };
        info!(
            commands = workspace.commands.registered_commands().len(),
            strict_forms = config.strict_forms,
            "workspace ready"
        );
        Ok(workspace)
    }

    pub fn commands(&self) -> &Arc<InMemoryCommandBus> {
        &self.commands
    }

    pub fn queries(&self) -> &Arc<InMemoryQueryBus> {
        &self.queries
    }

    pub fn adapter<R: Tabled>(&self) -> &Arc<SyncAdapter<R>> {
        R::adapter(self)
    }

    /// 新建一个绑定到该类记录存储的视图
    pub fn view<R: Tabled>(&self) -> RecordView<R> {
        RecordView::new(self.adapter::<R>().store())
    }

    /// 全部表各加载一次；返回加载失败的表名（失败已由适配器通知）
    pub async fn load_all(&self) -> Vec<&'static str> {
        let results = [
            (Category::schema().table, self.categories.load().await.err()),
            (Customer::schema().table, self.customers.load().await.err()),
            (Employee::schema().table, self.employees.load().await.err()),
            (InventoryItem::schema().table, self.inventory.load().await.err()),
            (Order::schema().table, self.orders.load().await.err()),
            (Product::schema().table, self.products.load().await.err()),
            (Supplier::schema().table, self.suppliers.load().await.err()),
            (Warehouse::schema().table, self.warehouses.load().await.err()),
        ];

        let failed: Vec<_> = results
            .into_iter()
            .filter_map(|(table, err)| err.map(|_| table))
            .collect();
        if failed.is_empty() {
            info!("all tables loaded");
        } else {
            warn!(?failed, "some tables failed to load");
        }
        failed
    }

    /// 订单对应的客户（按姓名匹配客户列表）
    pub fn order_customer(&self, order: &RecordId) -> AppResult<Option<Customer>> {
        let order = self
            .orders
            .store()
            .find(order)
            .ok_or_else(|| DomainError::not_found(Order::schema().entity, order))?;
        Ok(self
            .customers
            .store()
            .list()
            .into_iter()
            .find(|c| c.name == order.customer))
    }

    pub fn dashboard(&self) -> Dashboard {
        Dashboard {
            stock: summary::stock_breakdown(&self.inventory.store().list()),
            categories: summary::category_totals(&self.categories.store().list()),
            warehouses: summary::warehouse_utilization(&self.warehouses.store().list()),
            orders: summary::order_totals(&self.orders.store().list()),
            headcount: summary::headcount_by_department(&self.employees.store().list()),
            suppliers: summary::supplier_activity(&self.suppliers.store().list()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockroom_domain::notify::InMemoryNotifier;

    fn workspace() -> Workspace {
        Workspace::new(&StockroomConfig::default(), Arc::new(InMemoryNotifier::new())).unwrap()
    }

    #[test]
    fn registers_five_handlers_per_table() {
        let ws = workspace();
        assert_eq!(ws.commands().registered_commands().len(), 24);
        assert_eq!(ws.queries().registered_queries().len(), 16);
    }

    #[test]
    fn seeded_tables_are_readable_before_load_all() {
        let ws = workspace();
        assert_eq!(ws.view::<Customer>().rows().unwrap().len(), 20);
        assert_eq!(ws.adapter::<Category>().store().len(), 10);
        assert!(ws.adapter::<Product>().store().is_empty());
        assert_eq!(ws.dashboard().stock.total_quantity, Some(627));
    }

    #[tokio::test]
    async fn load_all_fills_every_local_table() {
        let ws = workspace();
        assert!(ws.load_all().await.is_empty());
        assert_eq!(ws.adapter::<Customer>().store().len(), 20);
        assert_eq!(ws.adapter::<Category>().store().len(), 10);
        assert!(ws.adapter::<Product>().store().is_empty());
    }

    #[tokio::test]
    async fn orders_resolve_customers_by_name() {
        let ws = workspace();
        ws.load_all().await;
        let customer = ws.order_customer(&RecordId::from("ORD-005")).unwrap();
        assert_eq!(customer.map(|c| c.id.to_string()).as_deref(), Some("CUST-007"));

        // 订单上的姓名不一定在客户列表中
        assert_eq!(ws.order_customer(&RecordId::from("ORD-001")).unwrap(), None);

        let err = ws.order_customer(&RecordId::from("ORD-999")).unwrap_err();
        assert!(matches!(
            err,
            crate::error::AppError::Domain(DomainError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn dashboard_summarises_seed_data() {
        let ws = workspace();
        ws.load_all().await;
        let dashboard = ws.dashboard();
        assert_eq!(dashboard.stock.total_quantity, Some(627));
        assert_eq!(dashboard.categories.total_items, Some(1380));
        assert_eq!(dashboard.warehouses.overall_percent, Some(64));
        assert_eq!(dashboard.suppliers.active_orders, Some(86));
    }
}
