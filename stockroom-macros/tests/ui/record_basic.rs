use stockroom_domain::record::Entity;
use stockroom_domain::value_object::RecordId;
use stockroom_macros::record;

#[record(prefix = "SKU")]
struct Sku {
    name: String,
    stock: Option<i64>,
}

// 已声明 id 时不重复注入
#[record(prefix = "BIN", debug = false)]
struct Bin {
    id: RecordId,
    aisle: u32,
}

fn main() {
    let sku = Sku {
        id: RecordId::format(Sku::PREFIX, 7),
        name: "Cable".into(),
        stock: None,
    };
    assert_eq!(sku.id().as_str(), "SKU-007");
    let _ = format!("{:?}", sku.clone());
    assert!(sku == sku.clone());

    let bin = Bin {
        id: RecordId::from("BIN-001"),
        aisle: 3,
    };
    assert_eq!(Bin::PREFIX, "BIN");
    assert_eq!(bin.id().sequence(), Some(1));
    let _ = bin.aisle;
}
