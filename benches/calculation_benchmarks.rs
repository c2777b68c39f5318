//! Performance benchmarks for the payroll engine.
//!
//! This benchmark suite covers:
//! - The pure payroll formula
//! - Worked-hours derivation for a single day
//! - A full month calculation through the engine and in-memory store
//! - Batches of 100 and 1000 employees
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use std::str::FromStr;
use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use rust_decimal::Decimal;
use uuid::Uuid;

use payroll_engine::calculation::{FixedMonthCalendar, compute_payroll, worked_hours};
use payroll_engine::engine::PayrollEngine;
use payroll_engine::models::{
    AttendanceStatus, MonthSummary, NewAttendance, NewEmployee, NewSalaryStructure, PayPeriod,
    SalaryStructure,
};
use payroll_engine::store::InMemoryStore;

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn reference_structure() -> SalaryStructure {
    SalaryStructure {
        id: Uuid::new_v4(),
        employee_id: Uuid::new_v4(),
        base_salary: dec("3000.00"),
        hourly_rate: Some(dec("20.00")),
        house_allowance: dec("200.00"),
        transport_allowance: Decimal::ZERO,
        meal_allowance: Decimal::ZERO,
        other_allowances: Decimal::ZERO,
        overtime_rate_multiplier: dec("1.5"),
        holiday_rate_multiplier: dec("2.0"),
        tax_percentage: dec("10"),
        insurance_deduction: dec("50"),
        retirement_contribution: dec("100"),
        effective_from: date(2024, 1, 1),
        effective_to: None,
        created_at: Utc::now(),
    }
}

/// Creates an engine with `employees` employees, each with a structure and
/// `days` clocked days in April 2024.
fn populated_engine(employees: usize, days: u32) -> (PayrollEngine<InMemoryStore>, Vec<Uuid>) {
    let engine = PayrollEngine::new(InMemoryStore::new())
        .with_calendar(Arc::new(FixedMonthCalendar::new(30)));

    let ids = (0..employees)
        .map(|i| {
            let employee = engine
                .register_employee(NewEmployee {
                    employee_code: format!("BENCH-{:04}", i),
                    first_name: "Bench".to_string(),
                    last_name: format!("{:04}", i),
                    email: format!("bench{:04}@example.com", i),
                    hire_date: date(2020, 1, 1),
                    termination_date: None,
                    employment_type: Default::default(),
                    employment_status: Default::default(),
                    manager_id: None,
                    department_id: None,
                    position_id: None,
                })
                .expect("Failed to register employee");

            let mut structure = NewSalaryStructure::new(employee.id, dec("3000.00"), date(2024, 1, 1));
            structure.hourly_rate = Some(dec("20.00"));
            structure.tax_percentage = dec("10");
            engine
                .add_salary_structure(structure)
                .expect("Failed to add structure");

            for day in 1..=days {
                let d = date(2024, 4, day);
                engine
                    .record_attendance(NewAttendance {
                        employee_id: employee.id,
                        date: d,
                        clock_in: d.and_hms_opt(8, 0, 0),
                        clock_out: d.and_hms_opt(17, 30, 0),
                        break_start: d.and_hms_opt(12, 0, 0),
                        break_end: d.and_hms_opt(12, 30, 0),
                        status: AttendanceStatus::Present,
                        notes: None,
                    })
                    .expect("Failed to record attendance");
            }
            employee.id
        })
        .collect();

    (engine, ids)
}

fn april() -> PayPeriod {
    PayPeriod::new(2024, 4).unwrap()
}

/// Benchmark: Pure payroll formula.
fn bench_formula(c: &mut Criterion) {
    let structure = reference_structure();
    let summary = MonthSummary {
        days_worked: 20,
        total_hours: dec("165.00"),
        overtime_hours: dec("5.00"),
        leave_days: 0,
        absent_days: 0,
    };

    c.bench_function("payroll_formula", |b| {
        b.iter(|| {
            black_box(compute_payroll(
                black_box(&structure),
                black_box(&summary),
                april(),
                30,
                Decimal::ZERO,
            ))
        })
    });
}

/// Benchmark: Worked hours for one day with a break.
fn bench_worked_hours(c: &mut Criterion) {
    let day = date(2024, 4, 1);
    let clock_in = day.and_hms_opt(8, 0, 0).unwrap();
    let clock_out = day.and_hms_opt(17, 45, 30).unwrap();
    let break_start = day.and_hms_opt(12, 0, 0).unwrap();
    let break_end = day.and_hms_opt(12, 40, 0).unwrap();

    c.bench_function("worked_hours", |b| {
        b.iter(|| {
            black_box(worked_hours(
                black_box(clock_in),
                black_box(clock_out),
                Some(break_start),
                Some(break_end),
            ))
        })
    });
}

/// Benchmark: Month calculation through the engine, scaling with attendance.
fn bench_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("scaling");

    for days in [1u32, 5, 10, 20, 30].iter() {
        let (engine, ids) = populated_engine(1, *days);
        let employee_id = ids[0];

        group.throughput(Throughput::Elements(*days as u64));
        group.bench_with_input(BenchmarkId::new("attendance_days", days), days, |b, _| {
            b.iter(|| black_box(engine.calculate_payroll(employee_id, april())))
        });
    }

    group.finish();
}

/// Benchmark: Batch of 100 employees.
fn bench_batch_100(c: &mut Criterion) {
    let (engine, ids) = populated_engine(100, 20);

    let mut group = c.benchmark_group("batch_processing");
    group.throughput(Throughput::Elements(100));

    group.bench_function("batch_100", |b| {
        b.iter(|| black_box(engine.calculate_payroll_batch(&ids, april())))
    });

    group.finish();
}

/// Benchmark: Batch of 1000 employees.
fn bench_batch_1000(c: &mut Criterion) {
    let (engine, ids) = populated_engine(1000, 20);

    let mut group = c.benchmark_group("large_batch_processing");
    group.throughput(Throughput::Elements(1000));
    // Reduce sample size for large batches to keep benchmark time reasonable
    group.sample_size(10);

    group.bench_function("batch_1000", |b| {
        b.iter(|| black_box(engine.calculate_payroll_batch(&ids, april())))
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_formula,
    bench_worked_hours,
    bench_scaling,
    bench_batch_100,
    bench_batch_1000,
);
criterion_main!(benches);
