/***************************************/
/*        3rd party libraries          */
/***************************************/
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use crossterm::{cursor, queue, terminal};
use std::io::{Stdout, Write};

/***************************************/
/*           Local modules             */
/***************************************/
use crate::activity::{format_timestamp, LogCategory};
use crate::shared::{CallDirection, Direction, Elevator};
use crate::simulation::Snapshot;

/***************************************/
/*             Constants               */
/***************************************/
const CELL_WIDTH: usize = 7;

/***************************************/
/*       Public data structures        */
/***************************************/

/// A piece of text with an optional foreground color.
#[derive(Debug, Clone, PartialEq)]
pub struct Span {
    pub text: String,
    pub color: Option<Color>,
}

pub type Line = Vec<Span>;

fn plain(text: impl Into<String>) -> Span {
    Span {
        text: text.into(),
        color: None,
    }
}

fn colored(text: impl Into<String>, color: Color) -> Span {
    Span {
        text: text.into(),
        color: Some(color),
    }
}

/***************************************/
/*             Public API              */
/***************************************/

/// Human status, door state first, then motion, then direction.
pub fn status_label(elevator: &Elevator) -> String {
    if elevator.is_door_open {
        return "Doors Open".to_string();
    }
    if elevator.is_moving {
        return "Moving".to_string();
    }
    match elevator.direction {
        Direction::Idle => "Idle".to_string(),
        direction => format!("Going {}", direction),
    }
}

/// Color for the same precedence as `status_label`.
pub fn status_color(elevator: &Elevator) -> Color {
    if elevator.is_door_open {
        return Color::Yellow;
    }
    if elevator.is_moving {
        return Color::Blue;
    }
    match elevator.direction {
        Direction::Up => Color::Green,
        Direction::Down => Color::Red,
        Direction::Idle => Color::Grey,
    }
}

pub fn category_color(category: LogCategory) -> Color {
    match category {
        LogCategory::Call => Color::DarkYellow,
        LogCategory::Movement => Color::Blue,
        LogCategory::Pickup => Color::Green,
        LogCategory::Dropoff => Color::Magenta,
        LogCategory::System => Color::Grey,
    }
}

pub fn targets_label(elevator: &Elevator) -> String {
    if elevator.target_floors.is_empty() {
        return "None".to_string();
    }
    elevator
        .target_floors
        .iter()
        .map(|f| f.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

fn call_glyph(direction: CallDirection) -> &'static str {
    match direction {
        CallDirection::Up => "▲",
        CallDirection::Down => "▼",
    }
}

fn call_color(direction: CallDirection) -> Color {
    match direction {
        CallDirection::Up => Color::Green,
        CallDirection::Down => Color::Red,
    }
}

/// Builds every line of the screen from a snapshot.
pub fn compose(snapshot: &Snapshot, log_lines: usize) -> Vec<Line> {
    let mut lines = Vec::new();

    lines.push(vec![plain("ELEVATOR CONTROL SYSTEM")]);
    lines.push(control_panel(snapshot));
    lines.push(Vec::new());

    lines.push(vec![plain("BUILDING OVERVIEW")]);
    lines.extend(building(snapshot));
    lines.push(Vec::new());

    lines.push(vec![plain("ELEVATOR STATUS")]);
    for elevator in &snapshot.elevators {
        lines.push(vec![
            plain(format!("Elevator {:<3}", elevator.id)),
            colored(format!("{:<11}", status_label(elevator)), status_color(elevator)),
            plain(format!(
                " Floor: {:<3} Passengers: {:<3} Targets: {}",
                elevator.floor,
                elevator.passengers.len(),
                targets_label(elevator)
            )),
        ]);
    }
    lines.push(Vec::new());

    lines.push(vec![plain("ACTIVITY LOG")]);
    for entry in snapshot.logs.iter().take(log_lines) {
        lines.push(vec![
            plain(format!("{} ", format_timestamp(entry.timestamp))),
            colored(entry.message.clone(), category_color(entry.category)),
        ]);
    }

    lines
}

fn control_panel(snapshot: &Snapshot) -> Line {
    let (label, color) = if snapshot.running {
        ("[space] Pause", Color::Red)
    } else {
        ("[space] Start", Color::Green)
    };
    vec![
        colored(label, color),
        plain("  [r] Reset  [q] Quit   "),
        plain(format!(
            "Total Calls: {}  Active Calls: {}  Trips: {}  Avg Wait: {:.1}s",
            snapshot.stats.total_calls,
            snapshot.calls.len(),
            snapshot.stats.total_trips,
            snapshot.average_wait_time / 1000.0
        )),
    ]
}

// One row per floor, top floor first
fn building(snapshot: &Snapshot) -> Vec<Line> {
    let mut rows = Vec::new();

    let mut header = vec![plain("      ")];
    for elevator in &snapshot.elevators {
        header.push(plain(format!("{:^width$}", format!("E{}", elevator.id), width = CELL_WIDTH)));
    }
    header.push(plain(" Calls"));
    rows.push(header);

    for floor in (1..=snapshot.n_floors).rev() {
        let floor_calls: Vec<CallDirection> = snapshot
            .calls
            .iter()
            .filter(|call| call.floor == floor)
            .map(|call| call.direction)
            .collect();

        let mut row = vec![plain(format!("{:>4} |", floor))];
        for elevator in &snapshot.elevators {
            if elevator.floor == floor {
                let cell = if elevator.passengers.is_empty() {
                    format!("E{}", elevator.id)
                } else {
                    format!("E{}({})", elevator.id, elevator.passengers.len())
                };
                row.push(colored(format!("{:^width$}", cell, width = CELL_WIDTH), status_color(elevator)));
            } else if let Some(direction) = floor_calls.first() {
                row.push(colored(
                    format!("{:^width$}", call_glyph(*direction), width = CELL_WIDTH),
                    call_color(*direction),
                ));
            } else {
                row.push(plain(format!("{:^width$}", ".", width = CELL_WIDTH)));
            }
        }

        row.push(plain(" "));
        for direction in &floor_calls {
            row.push(colored(call_glyph(*direction), call_color(*direction)));
        }
        rows.push(row);
    }

    rows
}

/// Draws composed lines onto the terminal, top-left aligned.
pub struct Renderer {
    stdout: Stdout,
    log_lines: usize,
}

impl Renderer {
    pub fn new(stdout: Stdout, log_lines: usize) -> Renderer {
        Renderer { stdout, log_lines }
    }

    pub fn draw(&mut self, snapshot: &Snapshot) -> std::io::Result<()> {
        let lines = compose(snapshot, self.log_lines);

        for (row, line) in lines.iter().enumerate() {
            queue!(self.stdout, cursor::MoveTo(0, row as u16))?;
            for span in line {
                match span.color {
                    Some(color) => queue!(
                        self.stdout,
                        SetForegroundColor(color),
                        Print(&span.text),
                        ResetColor
                    )?,
                    None => queue!(self.stdout, Print(&span.text))?,
                }
            }
            queue!(self.stdout, terminal::Clear(terminal::ClearType::UntilNewLine))?;
        }
        queue!(
            self.stdout,
            cursor::MoveTo(0, lines.len() as u16),
            terminal::Clear(terminal::ClearType::FromCursorDown)
        )?;

        self.stdout.flush()
    }
}
