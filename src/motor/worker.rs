//! Thread-owned motor that serialises run requests (std only).
//!
//! The worker thread owns the [`StepperMotor`] and takes commands from a
//! channel one at a time, so runs on the same motor never overlap. Progress is
//! read through a [`MotorMonitor`] without going through the queue.

use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::{self, JoinHandle};

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::config::units::Speed;
use crate::error::{Error, MotorError, Result};
use crate::motion::Direction;

use super::driver::{RunReport, StepperMotor};
use super::state::MotorMonitor;

/// A rotation request for a [`MotorWorker`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunRequest {
    /// Rotation direction.
    pub direction: Direction,
    /// Angle in degrees.
    pub angle: u32,
    /// Rotation speed.
    pub speed: Speed,
}

impl RunRequest {
    /// Create a request.
    pub fn new(direction: Direction, angle: u32, speed: Speed) -> Self {
        Self {
            direction,
            angle,
            speed,
        }
    }
}

enum Command {
    Run {
        request: RunRequest,
        reply: Sender<Result<RunReport>>,
    },
    SetThreshold(u32),
}

/// Handle to a run submitted to a [`MotorWorker`].
#[derive(Debug)]
pub struct PendingRun {
    reply: Receiver<Result<RunReport>>,
}

impl PendingRun {
    /// Block until the run finishes.
    ///
    /// # Errors
    ///
    /// Returns the run's own error, or `MotorError::WorkerStopped` if the
    /// worker went away before answering.
    pub fn wait(self) -> Result<RunReport> {
        self.reply
            .recv()
            .map_err(|_| Error::Motor(MotorError::WorkerStopped))?
    }

    /// Return the result if the run has finished.
    pub fn try_wait(&self) -> Option<Result<RunReport>> {
        match self.reply.try_recv() {
            Ok(result) => Some(result),
            Err(mpsc::TryRecvError::Empty) => None,
            Err(mpsc::TryRecvError::Disconnected) => {
                Some(Err(Error::Motor(MotorError::WorkerStopped)))
            }
        }
    }
}

/// A motor driven from its own thread.
///
/// Commands are processed in submission order. Threshold changes queued with
/// [`set_threshold`](Self::set_threshold) therefore take effect between runs,
/// never during one.
pub struct MotorWorker<PIN, DELAY>
where
    PIN: OutputPin + Send + 'static,
    DELAY: DelayNs + Send + 'static,
{
    commands: Option<Sender<Command>>,
    monitor: MotorMonitor,
    thread: Option<JoinHandle<StepperMotor<PIN, DELAY>>>,
}

impl<PIN, DELAY> MotorWorker<PIN, DELAY>
where
    PIN: OutputPin + Send + 'static,
    DELAY: DelayNs + Send + 'static,
{
    /// Move `motor` onto a new thread.
    ///
    /// # Errors
    ///
    /// Returns `MotorError::WorkerStopped` if the thread cannot be spawned.
    pub fn spawn(motor: StepperMotor<PIN, DELAY>) -> Result<Self> {
        let monitor = motor.monitor();
        let (commands, inbox) = mpsc::channel();

        let thread = thread::Builder::new()
            .name(std::format!("stepper-{}", motor.name()))
            .spawn(move || serve(motor, inbox))
            .map_err(|_| Error::Motor(MotorError::WorkerStopped))?;

        Ok(Self {
            commands: Some(commands),
            monitor,
            thread: Some(thread),
        })
    }

    /// Queue a run and return immediately.
    ///
    /// # Errors
    ///
    /// Returns `MotorError::WorkerStopped` if the worker is gone.
    pub fn submit(&self, request: RunRequest) -> Result<PendingRun> {
        let (reply, receiver) = mpsc::channel();
        self.send(Command::Run { request, reply })?;
        Ok(PendingRun { reply: receiver })
    }

    /// Queue a run and wait for it.
    ///
    /// # Errors
    ///
    /// As [`StepperMotor::run`], or `MotorError::WorkerStopped`.
    pub fn run(&self, direction: Direction, angle: u32, speed: Speed) -> Result<RunReport> {
        self.submit(RunRequest::new(direction, angle, speed))?.wait()
    }

    /// Queue a threshold change, applied once earlier commands are done.
    ///
    /// # Errors
    ///
    /// Returns `MotorError::WorkerStopped` if the worker is gone.
    pub fn set_threshold(&self, threshold: u32) -> Result<()> {
        self.send(Command::SetThreshold(threshold))
    }

    /// Progress handle for this motor.
    pub fn monitor(&self) -> MotorMonitor {
        self.monitor.clone()
    }

    /// Finish queued commands, stop the thread and hand the motor back.
    ///
    /// # Errors
    ///
    /// Returns `MotorError::WorkerStopped` if the thread panicked.
    pub fn shutdown(mut self) -> Result<StepperMotor<PIN, DELAY>> {
        self.commands.take();
        let thread = self
            .thread
            .take()
            .ok_or(Error::Motor(MotorError::WorkerStopped))?;
        thread
            .join()
            .map_err(|_| Error::Motor(MotorError::WorkerStopped))
    }

    fn send(&self, command: Command) -> Result<()> {
        self.commands
            .as_ref()
            .ok_or(Error::Motor(MotorError::WorkerStopped))?
            .send(command)
            .map_err(|_| Error::Motor(MotorError::WorkerStopped))
    }
}

impl<PIN, DELAY> Drop for MotorWorker<PIN, DELAY>
where
    PIN: OutputPin + Send + 'static,
    DELAY: DelayNs + Send + 'static,
{
    fn drop(&mut self) {
        self.commands.take();
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

fn serve<PIN, DELAY>(
    mut motor: StepperMotor<PIN, DELAY>,
    inbox: Receiver<Command>,
) -> StepperMotor<PIN, DELAY>
where
    PIN: OutputPin,
    DELAY: DelayNs,
{
    debug!("{=str}: worker started", motor.name());
    for command in inbox {
        match command {
            Command::Run { request, reply } => {
                let result = motor.run(request.direction, request.angle, request.speed);
                // The submitter may have dropped its PendingRun.
                let _ = reply.send(result);
            }
            Command::SetThreshold(threshold) => motor.set_threshold(threshold),
        }
    }
    debug!("{=str}: worker stopped", motor.name());
    motor
}
