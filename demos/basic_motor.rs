//! Basic motor control example.
//!
//! Turns a 28BYJ48 270 degrees clockwise and back again at 60% speed.
//!
//! The coil lines are simulated, so this runs without real hardware.

use unipolar_stepper::{Direction, Speed, StepperMotor};

/// Delay provider backed by the host clock.
struct SleepDelay;

impl embedded_hal::delay::DelayNs for SleepDelay {
    fn delay_ns(&mut self, ns: u32) {
        // On a board this would be a hardware timer
        std::thread::sleep(std::time::Duration::from_nanos(u64::from(ns)));
    }
}

/// Simulated coil line.
struct SimPin {
    state: bool,
}

impl SimPin {
    fn new() -> Self {
        Self { state: false }
    }
}

impl embedded_hal::digital::ErrorType for SimPin {
    type Error = core::convert::Infallible;
}

impl embedded_hal::digital::OutputPin for SimPin {
    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.state = true;
        Ok(())
    }

    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.state = false;
        Ok(())
    }
}

fn main() {
    println!("=== Basic Motor Control Example ===\n");

    let mut motor = StepperMotor::builder()
        .name("demo_motor")
        .pins([SimPin::new(), SimPin::new(), SimPin::new(), SimPin::new()])
        .delay(SleepDelay)
        .build()
        .expect("Failed to build motor");

    println!("Motor created: {}", motor.name());
    println!("Pins: {:?}", motor.state().pins());

    for direction in [Direction::Clockwise, Direction::CounterClockwise] {
        let plan = motor
            .plan(direction, 270, Speed::PERCENT_60)
            .expect("Failed to plan run");
        println!(
            "\n{:?}: {} steps, {} us per step, about {:.1} s",
            direction,
            plan.steps,
            plan.step_delay_us,
            plan.duration_us() as f64 / 1_000_000.0
        );

        let report = motor
            .run(direction, 270, Speed::PERCENT_60)
            .expect("Run failed");
        println!(
            "Done: {} steps written, position {}",
            report.steps_executed, report.final_position
        );
    }

    let (pins, _) = motor.free();
    println!(
        "\nAll lines released: {}",
        pins.iter().all(|pin| !pin.state)
    );
    println!("\n=== Example Complete ===");
}
