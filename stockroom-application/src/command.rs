use std::fmt;
use std::marker::PhantomData;
use stockroom_domain::form::FormInput;
use stockroom_domain::record::Record;
use stockroom_domain::value_object::RecordId;

/// 应用层命令（Command）
///
/// 表达写意图，只返回成功或失败。`NAME` 用于日志与路由，
/// 不依赖 `type_name::<T>()`。
pub trait Command: Send + Sync + 'static {
    const NAME: &'static str;
}

/// 以表单新增一条记录
pub struct AddRecord<R> {
    pub form: FormInput,
    _record: PhantomData<fn() -> R>,
}

/// 以表单覆盖一条记录中出现的字段
pub struct EditRecord<R> {
    pub id: RecordId,
    pub form: FormInput,
    _record: PhantomData<fn() -> R>,
}

pub struct DeleteRecord<R> {
    pub id: RecordId,
    _record: PhantomData<fn() -> R>,
}

impl<R> AddRecord<R> {
    pub fn new(form: FormInput) -> Self {
        Self {
            form,
            _record: PhantomData,
        }
    }
}

impl<R> EditRecord<R> {
    pub fn new(id: impl Into<RecordId>, form: FormInput) -> Self {
        Self {
            id: id.into(),
            form,
            _record: PhantomData,
        }
    }
}

impl<R> DeleteRecord<R> {
    pub fn new(id: impl Into<RecordId>) -> Self {
        Self {
            id: id.into(),
            _record: PhantomData,
        }
    }
}

impl<R: Record> Command for AddRecord<R> {
    const NAME: &'static str = "AddRecord";
}

impl<R: Record> Command for EditRecord<R> {
    const NAME: &'static str = "EditRecord";
}

impl<R: Record> Command for DeleteRecord<R> {
    const NAME: &'static str = "DeleteRecord";
}

impl<R: Record> fmt::Debug for AddRecord<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AddRecord")
            .field("entity", &R::schema().entity)
            .field("form", &self.form)
            .finish()
    }
}

impl<R: Record> fmt::Debug for EditRecord<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EditRecord")
            .field("entity", &R::schema().entity)
            .field("id", &self.id)
            .field("form", &self.form)
            .finish()
    }
}

impl<R: Record> fmt::Debug for DeleteRecord<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeleteRecord")
            .field("entity", &R::schema().entity)
            .field("id", &self.id)
            .finish()
    }
}
