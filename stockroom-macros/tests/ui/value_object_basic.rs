use stockroom_macros::value_object;

#[value_object]
struct Dimensions {
    width: i64,
    depth: i64,
}

#[value_object(eq = false)]
struct Weight {
    kilograms: Option<f64>,
}

#[value_object(debug = false)]
struct Bay(u8);

#[value_object]
enum Zone {
    #[default]
    Dry,
    Chilled,
}

fn main() {
    // Debug 默认开启
    let _ = format!("{:?}", Dimensions { width: 1, depth: 2 });

    let d = Dimensions::default();
    assert!(d == d.clone());

    // eq = false 仍保留 PartialEq
    let w = Weight { kilograms: Some(1.5) };
    assert!(w == w.clone());

    let _ = Bay(4);

    // Serialize/Deserialize 可用
    fn assert_serde<T: serde::Serialize + for<'de> serde::Deserialize<'de>>() {}
    assert_serde::<Zone>();
    let _zone: Zone = Default::default();
}
