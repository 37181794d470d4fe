use chrono::NaiveDate;

use roster_core::types::{AvailabilitySlot, TimeSpan, WeekAvailability, WeekCapacity};
use roster_core::ScheduleEngine;

fn main() {
    // 1) Configure two spans and a sample week of availability
    let spans = vec![
        TimeSpan::new(1, "Morning", "06:00", "14:00"),
        TimeSpan::new(2, "Evening", "14:00", "22:00"),
    ];

    let week_start = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();

    let availabilities = vec![
        WeekAvailability::new(1, week_start)
            .with_day("Monday", vec![AvailabilitySlot::new("06:00", "14:00")])
            .with_day("Tuesday", vec![AvailabilitySlot::new("06:00", "22:00")])
            .with_day("Wednesday", vec![AvailabilitySlot::new("08:00", "12:00")]),
        WeekAvailability::new(2, week_start)
            .with_day("Monday", vec![AvailabilitySlot::new("14:00", "22:00")])
            .with_day("Tuesday", vec![AvailabilitySlot::new("14:00", "22:00")]),
        WeekAvailability::new(3, week_start)
            .with_day("Monday", vec![AvailabilitySlot::new("10:00", "18:00")]),
    ];

    let capacities = WeekCapacity::new()
        .with_span_cap("*", 1, 1.0)
        .with_span_cap("*", 2, 1.0)
        .with_day_cap("*", 3.0);

    // 2) Solve
    let engine = ScheduleEngine::with_default_solver(spans);
    match engine.solve_week(&availabilities, week_start, &capacities) {
        Ok(solution) => {
            println!("--- Assignments ---");
            for shift in &solution.assignments {
                println!(
                    "  {} {}-{} employee {}",
                    shift.date, shift.start_time, shift.end_time, shift.user_id
                );
            }

            println!("--- Unfilled ---");
            for entry in &solution.unfilled {
                println!(
                    "  {} span {}: {} remaining",
                    entry.day, entry.span_id, entry.remaining
                );
                for gap in &entry.gaps {
                    println!("    gap {}-{}", gap.start_time, gap.end_time);
                }
            }
        }
        Err(e) => eprintln!("Scheduling error: {}", e),
    }
}
