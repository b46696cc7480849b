use crate::{
    context::AppContext, error::AppError, query::Query, query_bus::QueryBus,
    query_handler::QueryHandler,
};
use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::any::{Any, TypeId, type_name};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use tracing::Instrument;

type BoxAnySend = Box<dyn Any + Send>;

type QueryHandlerFuture<'a> =
    Pin<Box<dyn Future<Output = Result<BoxAnySend, AppError>> + Send + 'a>>;

type QueryHandlerFn =
    Arc<dyn for<'a> Fn(BoxAnySend, &'a AppContext) -> QueryHandlerFuture<'a> + Send + Sync>;

/// 基于内存的 QueryBus 实现
/// - 以查询类型的 TypeId 为键（结果类型由查询决定）
/// - 以类型擦除方式调度，并在调用端还原 DTO
#[derive(Default)]
pub struct InMemoryQueryBus {
    handlers: DashMap<TypeId, (&'static str, QueryHandlerFn)>,
}

impl InMemoryQueryBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// 注册查询处理器
    pub fn register<Q, H>(&self, handler: Arc<H>) -> Result<(), AppError>
    where
        Q: Query,
        H: QueryHandler<Q> + 'static,
    {
        let f: QueryHandlerFn = Arc::new(move |boxed_q, ctx| {
            let handler = handler.clone();

            Box::pin(async move {
                match boxed_q.downcast::<Q>() {
                    Ok(q) => {
                        let dto = handler.handle(ctx, *q).await?;
                        Ok(Box::new(dto) as BoxAnySend)
                    }
                    Err(_) => Err(AppError::TypeMismatch {
                        expected: type_name::<Q>(),
                        found: "unknown",
                    }),
                }
            })
        });

        // 检查与插入在同一分片锁内完成
        match self.handlers.entry(TypeId::of::<Q>()) {
            Entry::Occupied(_) => Err(AppError::AlreadyRegisteredQuery {
                query: type_name::<Q>(),
            }),
            Entry::Vacant(slot) => {
                slot.insert((type_name::<Q>(), f));
                Ok(())
            }
        }
    }

    /// 已注册的查询类型名
    pub fn registered_queries(&self) -> Vec<&'static str> {
        self.handlers.iter().map(|e| e.value().0).collect()
    }
}

#[async_trait]
impl QueryBus for InMemoryQueryBus {
    async fn dispatch<Q: Query>(&self, ctx: &AppContext, q: Q) -> Result<Q::Dto, AppError> {
        let Some(f) = self
            .handlers
            .get(&TypeId::of::<Q>())
            .map(|h| h.value().1.clone())
        else {
            return Err(AppError::HandlerNotFound(type_name::<Q>()));
        };

        let span = tracing::debug_span!(
            "query",
            name = Q::NAME,
            correlation_id = ctx.correlation_id.as_deref().unwrap_or("-"),
        );
        let out = (f)(Box::new(q), ctx).instrument(span).await?;

        match out.downcast::<Q::Dto>() {
            Ok(dto) => Ok(*dto),
            Err(_) => Err(AppError::TypeMismatch {
                expected: type_name::<Q::Dto>(),
                found: "unknown",
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dto::Dto;
    use serde::Serialize;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use stockroom_domain::model::InventoryItem;
    use stockroom_domain::seed;
    use stockroom_domain::store::RecordStore;
    use stockroom_domain::value_object::RecordId;
    use tokio::task::JoinSet;

    /// 查询某个库存条目的现有量
    #[derive(Debug)]
    struct QuantityOf(&'static str);

    #[derive(Debug, PartialEq, Serialize)]
    struct StockLevel {
        id: String,
        quantity: Option<i64>,
    }

    impl Dto for StockLevel {}

    impl Query for QuantityOf {
        const NAME: &'static str = "QuantityOf";
        type Dto = StockLevel;
    }

    struct StockHandler {
        store: RecordStore<InventoryItem>,
        calls: AtomicUsize,
    }

    impl StockHandler {
        fn seeded() -> Arc<Self> {
            Arc::new(Self {
                store: RecordStore::new(seed::inventory()),
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl QueryHandler<QuantityOf> for StockHandler {
        async fn handle(&self, _ctx: &AppContext, q: QuantityOf) -> Result<StockLevel, AppError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let item = self.store.find(&RecordId::from(q.0));
            Ok(StockLevel {
                id: q.0.to_string(),
                quantity: item.and_then(|i| i.quantity),
            })
        }
    }

    #[tokio::test]
    async fn dispatch_reaches_registered_handler() {
        let bus = InMemoryQueryBus::new();
        bus.register::<QuantityOf, _>(StockHandler::seeded()).unwrap();

        let level = bus
            .dispatch(&AppContext::default(), QuantityOf("INV-002"))
            .await
            .unwrap();
        assert_eq!(level.quantity, Some(12));

        let missing = bus
            .dispatch(&AppContext::default(), QuantityOf("INV-404"))
            .await
            .unwrap();
        assert_eq!(missing.quantity, None);
        assert_eq!(bus.registered_queries().len(), 1);
    }

    #[tokio::test]
    async fn unregistered_query_is_not_found() {
        let bus = InMemoryQueryBus::new();
        let err = bus
            .dispatch(&AppContext::default(), QuantityOf("INV-001"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::HandlerNotFound(name) if name.contains("QuantityOf")));
    }

    #[tokio::test]
    async fn wrong_result_type_is_a_mismatch() {
        let bus = InMemoryQueryBus::new();
        // 键是 QuantityOf，闭包却返回别的类型
        let f: QueryHandlerFn =
            Arc::new(|_q, _ctx| Box::pin(async move { Ok(Box::new(42_i64) as BoxAnySend) }));
        bus.handlers
            .insert(TypeId::of::<QuantityOf>(), (type_name::<QuantityOf>(), f));

        let err = bus
            .dispatch(&AppContext::default(), QuantityOf("INV-001"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::TypeMismatch { expected, .. } if expected.contains("StockLevel")));
    }

    #[test]
    fn second_registration_is_rejected() {
        let bus = InMemoryQueryBus::new();
        let handler = StockHandler::seeded();
        bus.register::<QuantityOf, _>(handler.clone()).unwrap();
        let err = bus.register::<QuantityOf, _>(handler).unwrap_err();
        assert!(matches!(err, AppError::AlreadyRegisteredQuery { .. }));
    }

    #[test]
    fn racing_registrations_admit_exactly_one() {
        let bus = InMemoryQueryBus::new();
        let handler = StockHandler::seeded();
        let accepted = AtomicUsize::new(0);
        std::thread::scope(|s| {
            for _ in 0..16 {
                s.spawn(|| {
                    if bus.register::<QuantityOf, _>(handler.clone()).is_ok() {
                        accepted.fetch_add(1, Ordering::SeqCst);
                    }
                });
            }
        });
        assert_eq!(accepted.load(Ordering::SeqCst), 1);
        assert_eq!(bus.registered_queries(), [type_name::<QuantityOf>()]);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_reads_share_one_handler() {
        let bus = Arc::new(InMemoryQueryBus::new());
        let handler = StockHandler::seeded();
        bus.register::<QuantityOf, _>(handler.clone()).unwrap();

        let mut set = JoinSet::new();
        for _ in 0..64 {
            let bus = bus.clone();
            set.spawn(async move {
                bus.dispatch(&AppContext::default(), QuantityOf("INV-003"))
                    .await
                    .map(|level| level.quantity)
            });
        }
        while let Some(res) = set.join_next().await {
            assert_eq!(res.unwrap().unwrap(), Some(200));
        }
        assert_eq!(handler.calls.load(Ordering::SeqCst), 64);
    }
}
