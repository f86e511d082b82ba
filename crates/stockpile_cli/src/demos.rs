//! Transcript printers, one per use-case.

use chrono::{Days, Local, Utc};
use std::fmt::Display;
use std::fs;
use std::path::Path;
use stockpile_core::service::grading_service::{read_students, write_report};
use stockpile_core::{
    Account, CareService, Cents, FinanceService, PaymentChannel, Transaction, ElectronicItem, EntityRepository, InventoryItem, InventoryRecordsService,
    RepoError, Section, StockRepository, Stocked, WarehouseService,
};

const SAMPLE_RESULTS: &str = "\
101, Alice Smith, 84
102, Bob Johnson, 73

103, Carol Williams, 65
104, David Brown, 52
105, Eva Davis, 38
";

fn print_all<T: Display>(items: &[T], empty_message: &str) {
    if items.is_empty() {
        println!("{empty_message}");
    } else {
        for item in items {
            println!("  • {item}");
        }
    }
    println!();
}

pub fn warehouse() {
    println!("=== Warehouse Inventory Management System ===");
    println!();

    let mut warehouse = WarehouseService::new();
    println!("--- Seeding Sample Data ---");
    match warehouse.seed(Local::now().date_naive()) {
        Ok(()) => println!("Sample data seeded successfully!"),
        Err(err) => println!("Error seeding data: {err}"),
    }
    println!();

    println!("--- All Grocery Items ---");
    print_all(&warehouse.groceries().get_all(), "No items found in inventory.");
    println!("--- All Electronic Items ---");
    print_all(&warehouse.electronics().get_all(), "No items found in inventory.");

    println!("--- Testing Error Handling ---");
    println!("1. Trying to add duplicate item...");
    let duplicate = ElectronicItem::new(1, "Duplicate Phone", 5, "Generic", 6);
    if let Err(err @ RepoError::DuplicateKey { .. }) = warehouse.electronics_mut().add(duplicate) {
        println!("Caught expected error: {err}");
    }
    println!();

    println!("2. Trying to remove non-existent item...");
    match warehouse.remove_item(Section::Electronics, 999) {
        Ok(item) => println!("Removed {item}"),
        Err(err) => println!("Failed to remove item: {err}"),
    }
    println!();

    println!("3. Trying to update with negative quantity...");
    if let Err(err @ RepoError::InvalidValue { .. }) =
        warehouse.electronics_mut().update_quantity(1, -5)
    {
        println!("Caught expected error: {err}");
    }
    println!();

    println!("--- Successful Operations ---");
    println!("Increasing stock for Samsung Galaxy S23...");
    match warehouse.increase_stock(Section::Electronics, 1, 10) {
        Ok(quantity) => {
            println!("Successfully increased stock for item ID 1. New quantity: {quantity}")
        }
        Err(err) => println!("Failed to increase stock: {err}"),
    }
    println!();

    println!("Final Electronic Items after stock increase:");
    print_all(&warehouse.electronics().get_all(), "No items found in inventory.");
}

pub fn healthcare() {
    println!("=== Healthcare Management System ===");
    println!();

    let mut care = CareService::new();
    println!("--- Seeding Sample Data ---");
    if let Err(err) = care.seed(Local::now().date_naive()) {
        println!("Error seeding data: {err}");
    }
    let groups = care.build_prescription_map();
    println!("Prescription map built with {groups} patient groups.");
    println!();

    println!("--- All Patients ---");
    print_all(&care.patients(), "No patients found.");

    for patient_id in [1, 2, 4] {
        println!("--- Prescriptions for Patient ID {patient_id} ---");
        match care.prescriptions_for(patient_id) {
            Ok((patient, prescriptions)) => {
                println!("Patient: {}", patient.name);
                println!("Total prescriptions: {}", prescriptions.len());
                print_all(&prescriptions, "No prescriptions found for this patient.");
            }
            Err(err) => {
                println!("{err}");
                println!();
            }
        }
    }
}

pub fn finance() {
    println!("=== Finance Management System ===");
    println!();

    let account = Account::savings("SAV-12345", Cents::new(1000, 0));
    println!(
        "Created savings account {} with initial balance: {}",
        account.number(),
        account.balance()
    );
    println!();

    let today = Local::now().date_naive();
    let days_ago = |days: u64| today.checked_sub_days(Days::new(days)).unwrap_or(today);
    let batch = [
        (
            PaymentChannel::MobileMoney,
            Transaction::new(1, days_ago(2), Cents::new(150, 50), "Groceries"),
        ),
        (
            PaymentChannel::BankTransfer,
            Transaction::new(2, days_ago(1), Cents::new(85, 25), "Utilities"),
        ),
        (
            PaymentChannel::CryptoWallet,
            Transaction::new(3, today, Cents::new(200, 0), "Entertainment"),
        ),
        (
            PaymentChannel::BankTransfer,
            Transaction::new(4, today, Cents::new(2500, 0), "New Laptop"),
        ),
    ];

    let mut ledger = FinanceService::new(account);
    println!("--- Processing Transactions ---");
    for (channel, transaction) in batch {
        println!(
            "[{}] Processing {} for {} (ID: {})",
            channel.label(),
            transaction.amount,
            transaction.category,
            transaction.id
        );
        match ledger.process(channel, transaction) {
            Ok(receipt) => {
                println!("{}", channel.confirmation(&receipt.transaction));
                println!("Updated balance: {}", receipt.balance_after);
            }
            Err(err) => println!("Transaction refused: {err}"),
        }
        println!();
    }

    let summary = ledger.summary();
    println!("--- Transaction Summary ---");
    println!("Total transactions processed: {}", summary.count);
    print_all(&ledger.transactions(), "No transactions recorded.");
    println!("Total amount processed: {}", summary.total);
    println!("Final account balance: {}", summary.balance);
    println!();
}

pub fn inventory_records(data_file: &Path) {
    println!("=== Inventory Records Management System ===");
    println!();

    println!("--- Demonstrating Record Immutability ---");
    let original = InventoryItem::new(999, "Test Item", 10, Utc::now());
    let modified = original.with_quantity(20).with_name("Modified Test Item");
    println!("Original item: {original}");
    println!("Modified copy: {modified}");
    println!("Original unchanged: {original}");
    println!();

    let mut records = InventoryRecordsService::new(data_file);
    println!("--- Seeding Sample Inventory Data ---");
    if let Err(err) = records.seed(Utc::now()) {
        println!("Error seeding data: {err}");
    }
    print_records(&records);

    println!("--- Saving Data to Disk ---");
    match records.save() {
        Ok(count) => println!("Successfully saved {count} items to {}.", data_file.display()),
        Err(err) => println!("Failed to save inventory: {err}"),
    }
    println!();

    println!("--- Simulating New Session (Clearing Memory) ---");
    records.new_session();
    print_records(&records);

    println!("--- Loading Data from Disk ---");
    match records.load() {
        Ok(0) => println!("No saved inventory found. Starting with empty inventory log."),
        Ok(count) => println!("Successfully loaded {count} items from file."),
        Err(err) => println!("Failed to load inventory, starting empty: {err}"),
    }
    println!();
    print_records(&records);
}

fn print_records(records: &InventoryRecordsService) {
    let items = records.items();
    println!("--- Current Inventory Items ({}) ---", items.len());
    print_all(&items, "No items found in inventory log.");
}

pub fn grading(data_file: &Path) {
    println!("=== School Grading System ===");
    println!();

    let input = data_file.with_file_name("students_input.txt");
    let report = data_file.with_file_name("students_report.txt");
    if let Err(err) = fs::write(&input, SAMPLE_RESULTS) {
        println!("Could not write sample input `{}`: {err}", input.display());
        return;
    }

    match read_students(&input) {
        Ok(students) => {
            let students = students.get_all();
            match write_report(&students, &report, Local::now().naive_local()) {
                Ok(count) => println!("Report with {count} students written to {}.", report.display()),
                Err(err) => println!("Failed to write report: {err}"),
            }
            print_all(&students, "No students found.");
        }
        Err(err) => println!("Failed to read student results: {err}"),
    }
}
