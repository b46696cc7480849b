//! 种子数据
//!
//! 工作区启动时装入内存仓储的固定记录。商品没有本地种子，来自远端。
//!
use crate::model::{
    Category, Customer, Employee, InventoryItem, Order, OrderLine, OrderStatus, Supplier,
    Warehouse,
};
use crate::value_object::{Address, Capacity, Location, RecordId};
use chrono::NaiveDate;

// 字面量日期均合法
fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

pub fn categories() -> Vec<Category> {
    [
        ("Electronics", "Electronic devices and accessories", 15, 150),
        ("Furniture", "Home and office furniture", 16, 75),
        ("Clothing", "Apparel and accessories", 17, 200),
        ("Books", "Books and publications", 18, 320),
        ("Sports", "Sports equipment and gear", 19, 100),
        ("Home Decor", "Decorative items for home", 20, 120),
        ("Toys", "Children's toys and games", 21, 180),
        ("Beauty", "Beauty and personal care products", 22, 90),
        ("Automotive", "Car parts and accessories", 23, 60),
        ("Garden", "Garden tools and supplies", 24, 85),
    ]
    .into_iter()
    .zip(1..)
    .map(|((name, description, day, items), seq)| Category {
        id: RecordId::format("CAT", seq),
        name: name.into(),
        description: description.into(),
        created_on: date(2024, 1, day),
        items: Some(items),
    })
    .collect()
}

pub fn customers() -> Vec<Customer> {
    [
        ("John Doe", "Los Angeles", "California", "90001"),
        ("Alice Smith", "Houston", "Texas", "77001"),
        ("Robert Brown", "New York", "New York", "10001"),
        ("Sarah Johnson", "Chicago", "Illinois", "60601"),
        ("Michael Williams", "Phoenix", "Arizona", "85001"),
        ("Emily Davis", "Philadelphia", "Pennsylvania", "19101"),
        ("David Miller", "San Antonio", "Texas", "78205"),
        ("Jennifer Wilson", "San Diego", "California", "92101"),
        ("James Taylor", "Dallas", "Texas", "75201"),
        ("Elizabeth Anderson", "San Jose", "California", "95101"),
        ("Richard Martinez", "Seattle", "Washington", "98101"),
        ("Patricia Thomas", "Denver", "Colorado", "80201"),
        ("Charles White", "Boston", "Massachusetts", "02108"),
        ("Linda Garcia", "Austin", "Texas", "73301"),
        ("Joseph Lee", "Portland", "Oregon", "97201"),
        ("Mary Rodriguez", "Miami", "Florida", "33101"),
        ("Thomas Walker", "Atlanta", "Georgia", "30301"),
        ("Karen Hernandez", "Detroit", "Michigan", "48201"),
        ("Daniel King", "Charlotte", "North Carolina", "28201"),
        ("Susan Wright", "Las Vegas", "Nevada", "89101"),
    ]
    .into_iter()
    .zip(1..)
    .map(|((name, city, state, zipcode), seq)| Customer {
        id: RecordId::format("CUST", seq),
        name: name.into(),
        city: city.into(),
        state: state.into(),
        zipcode: zipcode.into(),
    })
    .collect()
}

pub fn employees() -> Vec<Employee> {
    [
        ("John Smith", "Sales Manager", "Sales", "john.smith@example.com", "123-456-7890"),
        ("Emily Johnson", "Marketing Coordinator", "Marketing", "emily.johnson@example.com", "987-654-3210"),
        ("Michael Brown", "Software Engineer", "IT", "michael.brown@example.com", "555-123-4567"),
        ("Sarah Williams", "HR Specialist", "HR", "sarah.williams@example.com", "111-222-3333"),
        ("David Miller", "Accountant", "Finance", "david.miller@example.com", "444-555-6666"),
    ]
    .into_iter()
    .zip(1..)
    .map(|((name, position, department, email, phone), seq)| Employee {
        id: RecordId::format("EMP", seq),
        name: name.into(),
        position: position.into(),
        department: department.into(),
        email: email.into(),
        phone: phone.into(),
    })
    .collect()
}

pub fn suppliers() -> Vec<Supplier> {
    [
        ("TechSupplies Inc.", "tech@example.com", "555-123-4567", "Dallas", "Texas", 12),
        ("FurnitureDirect", "furniture@example.com", "555-234-5678", "Atlanta", "Georgia", 8),
        ("ClothingWorld", "clothing@example.com", "555-345-6789", "Los Angeles", "California", 15),
        ("ElectroGoods LLC", "electronics@example.com", "555-456-7890", "Seattle", "Washington", 5),
        ("HomeStuff Co.", "home@example.com", "555-567-8901", "Chicago", "Illinois", 10),
        ("BookWorld", "books@example.com", "555-678-9012", "New York", "New York", 7),
        ("SportSupplies", "sports@example.com", "555-789-0123", "Miami", "Florida", 9),
        ("KitchenExperts", "kitchen@example.com", "555-890-1234", "Phoenix", "Arizona", 6),
        ("GardeningPro", "garden@example.com", "555-901-2345", "Denver", "Colorado", 3),
        ("ToysGalore", "toys@example.com", "555-012-3456", "Boston", "Massachusetts", 11),
    ]
    .into_iter()
    .zip(1..)
    .map(|((name, email, phone, city, state, active), seq)| Supplier {
        id: RecordId::format("SUP", seq),
        name: name.into(),
        email: email.into(),
        phone: phone.into(),
        location: Location {
            city: city.into(),
            state: state.into(),
        },
        active_orders: Some(active),
    })
    .collect()
}

pub fn warehouses() -> Vec<Warehouse> {
    [
        ("East Distribution Center", "John Smith", "555-123-4567", "123 Commerce St", "New York", "New York", "10001", 50000, 35000),
        ("West Distribution Center", "Sarah Johnson", "555-234-5678", "456 Industry Ave", "Los Angeles", "California", "90001", 65000, 42000),
        ("Central Warehouse", "Michael Brown", "555-345-6789", "789 Logistics Blvd", "Chicago", "Illinois", "60601", 45000, 38000),
        ("South Distribution Center", "Emily Davis", "555-456-7890", "101 Storage Way", "Houston", "Texas", "77001", 70000, 30000),
        ("Northwest Facility", "David Miller", "555-567-8901", "202 Warehouse Rd", "Seattle", "Washington", "98101", 35000, 28000),
        ("Southeast Facility", "Jennifer Wilson", "555-678-9012", "303 Freight St", "Miami", "Florida", "33101", 40000, 22000),
    ]
    .into_iter()
    .zip(1..)
    .map(
        |((name, manager, phone, address, city, state, zip, total, used), seq)| Warehouse {
            id: RecordId::format("WH", seq),
            name: name.into(),
            manager: manager.into(),
            phone: phone.into(),
            location: Address {
                address: address.into(),
                city: city.into(),
                state: state.into(),
                zip: zip.into(),
            },
            capacity: Capacity::new(total, used),
        },
    )
    .collect()
}

pub fn inventory() -> Vec<InventoryItem> {
    [
        ("Wireless Headphones", "Electronics", "East Distribution Center", 45, 5, 1),
        ("Office Chair", "Furniture", "West Distribution Center", 12, 4, 30),
        ("Cotton T-shirt", "Clothing", "Central Warehouse", 200, 4, 29),
        ("Smartphone", "Electronics", "East Distribution Center", 28, 4, 28),
        ("Coffee Table", "Furniture", "South Distribution Center", 8, 4, 27),
        ("Denim Jeans", "Clothing", "Central Warehouse", 150, 4, 26),
        ("Bluetooth Speaker", "Electronics", "East Distribution Center", 35, 4, 25),
        ("Bookshelf", "Furniture", "West Distribution Center", 15, 4, 24),
        ("Hooded Sweatshirt", "Clothing", "Central Warehouse", 0, 4, 23),
        ("Tablet", "Electronics", "South Distribution Center", 18, 4, 22),
        ("Desk", "Furniture", "Northwest Facility", 10, 4, 21),
        ("Running Shoes", "Clothing", "Southeast Facility", 60, 4, 20),
        ("Smart Watch", "Electronics", "East Distribution Center", 0, 4, 19),
        ("Dining Chair Set", "Furniture", "West Distribution Center", 6, 4, 18),
        ("Winter Jacket", "Clothing", "Central Warehouse", 40, 4, 17),
    ]
    .into_iter()
    .zip(1..)
    .map(
        |((product, category, warehouse, quantity, month, day), seq)| InventoryItem {
            id: RecordId::format("INV", seq),
            product: product.into(),
            category: category.into(),
            warehouse: warehouse.into(),
            quantity: Some(quantity),
            last_updated: date(2025, month, day),
        },
    )
    .collect()
}

pub fn orders() -> Vec<Order> {
    let order = |seq, day: (u32, u32), customer: &str, status, total, items| Order {
        id: RecordId::format("ORD", seq),
        date: date(2025, day.0, day.1),
        customer: customer.into(),
        status,
        total: Some(total),
        items,
    };
    vec![
        order(
            1,
            (5, 1),
            "John Smith",
            OrderStatus::Completed,
            350.00,
            vec![
                OrderLine::new("Wireless Headphones", 1, 99.99),
                OrderLine::new("Bluetooth Speaker", 2, 79.99),
                OrderLine::new("Phone Case", 1, 19.99),
            ],
        ),
        order(
            2,
            (4, 30),
            "Emily Johnson",
            OrderStatus::Processing,
            125.50,
            vec![
                OrderLine::new("T-shirt", 2, 19.99),
                OrderLine::new("Jeans", 1, 59.99),
                OrderLine::new("Socks", 3, 8.49),
            ],
        ),
        order(
            3,
            (4, 29),
            "Michael Brown",
            OrderStatus::Pending,
            780.00,
            vec![
                OrderLine::new("Office Chair", 1, 199.95),
                OrderLine::new("Desk", 1, 249.95),
                OrderLine::new("Lamp", 2, 39.99),
                OrderLine::new("Bookshelf", 1, 89.95),
                OrderLine::new("Desk Organizer", 3, 19.99),
            ],
        ),
        order(
            4,
            (4, 28),
            "Sarah Williams",
            OrderStatus::Completed,
            92.75,
            vec![
                OrderLine::new("Water Bottle", 1, 19.99),
                OrderLine::new("Yoga Mat", 1, 24.99),
                OrderLine::new("Resistance Bands", 3, 15.99),
            ],
        ),
        order(
            5,
            (4, 27),
            "David Miller",
            OrderStatus::Processing,
            215.25,
            vec![
                OrderLine::new("Smart Watch", 1, 199.99),
                OrderLine::new("Watch Band", 1, 15.25),
            ],
        ),
    ]
}
