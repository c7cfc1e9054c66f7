//! Seed data for a fresh installation: the recurring daily catalog of a
//! hospitality back office and its starting roster.

use crate::models::{Category, Employee, Priority, Task};

fn task(
    id: u64,
    name: &str,
    description: &str,
    category: Category,
    estimated_minutes: u32,
    priority: Priority,
) -> Task {
    Task {
        id,
        name: name.to_string(),
        description: description.to_string(),
        category,
        estimated_minutes,
        priority,
        is_recurring: true,
    }
}

/// The default recurring task catalog.
pub fn default_catalog() -> Vec<Task> {
    vec![
        task(
            1,
            "Yesterday's Reservations Update",
            "Update and verify all reservations from previous day",
            Category::Reservations,
            30,
            Priority::High,
        ),
        task(
            2,
            "Tomorrow's Bookings Preparation",
            "Prepare and organize upcoming bookings for next day",
            Category::Reservations,
            45,
            Priority::High,
        ),
        task(
            3,
            "Card Payments",
            "Process and update all card payment transactions",
            Category::Payments,
            25,
            Priority::Medium,
        ),
        task(
            4,
            "Cash Payments",
            "Record and verify all cash payment transactions",
            Category::Payments,
            20,
            Priority::Medium,
        ),
        task(
            5,
            "Revenue Reconciliation",
            "Reconcile daily revenue with all payment methods",
            Category::Reconciliation,
            40,
            Priority::Urgent,
        ),
        task(
            6,
            "Check Cliq Messages",
            "Review and respond to all Cliq system messages",
            Category::Admin,
            15,
            Priority::Medium,
        ),
        task(
            7,
            "Xero",
            "Update financial records in Xero accounting system",
            Category::Reconciliation,
            35,
            Priority::High,
        ),
        task(
            8,
            "Hotels Occupancy & Tracking",
            "Update occupancy rates and tracking metrics",
            Category::Tracking,
            30,
            Priority::High,
        ),
        task(
            9,
            "Pending Payments",
            "Review and update all pending payment statuses",
            Category::Payments,
            25,
            Priority::Medium,
        ),
        task(
            10,
            "Green Gables Sheet",
            "Update Green Gables property tracking sheet",
            Category::Tracking,
            20,
            Priority::Medium,
        ),
        task(
            11,
            "Pay out Booking",
            "Process payout bookings and commissions",
            Category::Payments,
            30,
            Priority::Medium,
        ),
        task(
            12,
            "In&Out End of Day",
            "Complete end of day In&Out reconciliation process",
            Category::Reconciliation,
            45,
            Priority::Urgent,
        ),
    ]
}

/// The default employee roster.
pub fn default_roster() -> Vec<Employee> {
    let names = [
        (1, "Sarah Johnson", "Senior Revenue Analyst"),
        (2, "Michael Chen", "Reservations Specialist"),
        (3, "Emma Williams", "Payments Coordinator"),
        (4, "David Rodriguez", "Occupancy Analyst"),
        (5, "Lisa Thompson", "Reconciliation Specialist"),
    ];
    names
        .iter()
        .map(|(id, name, role)| Employee {
            id: *id,
            name: name.to_string(),
            role: role.to_string(),
            is_active: true,
        })
        .collect()
}
