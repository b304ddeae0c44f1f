//! Demo data loaded into the in-memory stores. Ids are reassigned on load,
//! starting at 1 in the order listed here.

use ahon_api::{
    Employee, Member, MembershipPlan, OrderStatus, Product, PurchaseOrder, Supplier,
    TrainingSession,
};

fn member(first_name: &str, last_name: &str, plan: MembershipPlan, active: bool) -> Member {
    Member {
        id: 0,
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        email: format!(
            "{}.{}@example.com",
            first_name.to_lowercase(),
            last_name.to_lowercase()
        ),
        plan,
        active,
    }
}

pub fn members() -> Vec<Member> {
    vec![
        member("Anna", "Reyes", MembershipPlan::Annual, true),
        member("Marco", "Dela Cruz", MembershipPlan::Monthly, true),
        member("Liza", "Santos", MembershipPlan::Quarterly, true),
        member("Paolo", "Garcia", MembershipPlan::WalkIn, false),
    ]
}

pub fn employees() -> Vec<Employee> {
    [
        ("Jessa Ramos", "Coach"),
        ("Rico Bautista", "Coach"),
        ("Mia Villanueva", "Front Desk"),
    ]
    .into_iter()
    .map(|(name, position)| Employee {
        id: 0,
        name: name.to_string(),
        position: position.to_string(),
        email: format!("{}@example.com", name.to_lowercase().replace(' ', ".")),
    })
    .collect()
}

pub fn products() -> Vec<Product> {
    [
        ("Whey Protein 2kg", "Supplements", 249_900, 12),
        ("Creatine 300g", "Supplements", 129_900, 3),
        ("Lifting Straps", "Accessories", 49_900, 20),
        ("Shaker Bottle", "Accessories", 29_900, 35),
    ]
    .into_iter()
    .map(|(name, category, price_cents, stock)| Product {
        id: 0,
        name: name.to_string(),
        category: category.to_string(),
        price_cents,
        stock,
    })
    .collect()
}

pub fn suppliers() -> Vec<Supplier> {
    vec![
        Supplier {
            id: 0,
            name: "Iron Supply Co.".to_string(),
            contact_email: "orders@ironsupply.example.com".to_string(),
            phone: "+63 2 8123 4567".to_string(),
        },
        Supplier {
            id: 0,
            name: "NutriSource".to_string(),
            contact_email: "sales@nutrisource.example.com".to_string(),
            phone: "+63 2 8765 4321".to_string(),
        },
    ]
}

pub fn purchase_orders() -> Vec<PurchaseOrder> {
    vec![
        PurchaseOrder {
            id: 0,
            supplier_id: 2,
            product_id: 2,
            quantity: 24,
            status: OrderStatus::Pending,
        },
        PurchaseOrder {
            id: 0,
            supplier_id: 1,
            product_id: 3,
            quantity: 10,
            status: OrderStatus::Delivered,
        },
    ]
}

pub fn training_sessions() -> Vec<TrainingSession> {
    vec![
        TrainingSession {
            id: 0,
            title: "Strength Basics".to_string(),
            coach_id: 1,
            schedule: "Mon 18:00".to_string(),
            capacity: 10,
            enrolled: vec![1, 2],
        },
        TrainingSession {
            id: 0,
            title: "HIIT".to_string(),
            coach_id: 2,
            schedule: "Wed 07:00".to_string(),
            capacity: 8,
            enrolled: vec![3],
        },
    ]
}
