use std::{
    io,
    time::{Duration, Instant},
};

use crossterm::event::{self, KeyCode};
use ratatui::{prelude::*, widgets::*};

use crate::{
    algo::QTableAgent,
    decay::Decay,
    env::{Action, Minefield},
    error,
};

use self::components::{event_keycode, help::render_help, Board, Component, Logs, Plots};

mod components;
mod tui;

const TABS: [&str; 3] = ["Board", "Plots", "Logs"];

/// How many training episodes run between frames, keeping the UI responsive
const EPISODES_PER_FRAME: u16 = 25;

/// Pacing of replayed moves
const PLAY_TICK: Duration = Duration::from_millis(200);

#[derive(Default, PartialEq)]
enum State {
    #[default]
    Idle,
    Train,
    Play,
    Quit,
}

/// Format for updating plot data
pub struct Update {
    pub episode: u16,
    pub data: Vec<f64>,
}

/// The root TUI component which owns an environment/agent pair and runs the
/// render loop
///
/// The app is the driving loop: it alternates action selection, environment
/// steps, and agent updates during training, and paces one action per tick
/// during playback. Keys: `t` trains for the configured number of episodes,
/// `p` replays a game with the learned table, `r` regenerates the board,
/// `Tab` cycles the Board/Plots/Logs panes, `h` toggles help, `q` quits.
pub struct App<D: Decay> {
    state: State,
    env: Minefield,
    agent: QTableAgent<D>,
    size: usize,
    mine_probability: f64,
    episode: u16,
    total_episodes: u16,
    selected_tab: usize,
    show_help: bool,
    status: String,
    last_tick: Instant,
    plots: Plots,
    logs: Logs,
}

impl<D: Decay> App<D> {
    pub fn new(
        env: Minefield,
        agent: QTableAgent<D>,
        size: usize,
        mine_probability: f64,
        episodes: u16,
    ) -> Self {
        Self {
            state: Default::default(),
            env,
            agent,
            size,
            mine_probability,
            episode: 0,
            total_episodes: episodes,
            selected_tab: 0,
            show_help: false,
            status: String::from("Welcome to the minefield!"),
            last_tick: Instant::now(),
            plots: Plots::new(vec!["reward", "steps"], episodes),
            logs: Logs::new(),
        }
    }

    /// Initialize the terminal and run the main loop
    ///
    /// Restores the terminal on exit
    pub fn run(&mut self) -> io::Result<()> {
        let mut terminal = tui::init()?;
        self.reset_board().map_err(io::Error::other)?;

        loop {
            match self.state {
                State::Train => self.train_chunk().map_err(io::Error::other)?,
                State::Play => {
                    if self.last_tick.elapsed() >= PLAY_TICK {
                        self.last_tick = Instant::now();
                        self.play_step().map_err(io::Error::other)?;
                    }
                }
                State::Idle => {}
                State::Quit => break,
            }

            terminal.draw(|frame| frame.render_widget(&*self, frame.size()))?;
            self.handle_events()?;
        }

        tui::restore()
    }

    fn handle_events(&mut self) -> io::Result<()> {
        if !event::poll(Duration::from_millis(16))? {
            return Ok(());
        }

        let event = event::read()?;
        if self.selected_tab == 2 && self.logs.handle_ui_event(&event) {
            return Ok(());
        }
        let Some(key) = event_keycode(&event) else {
            return Ok(());
        };

        match key {
            KeyCode::Char('q') => self.state = State::Quit,
            KeyCode::Char('h') => self.show_help = !self.show_help,
            KeyCode::Tab => self.selected_tab = (self.selected_tab + 1) % TABS.len(),
            KeyCode::Char('t') if self.state != State::Train => {
                self.episode = 0;
                self.plots = Plots::new(vec!["reward", "steps"], self.total_episodes);
                self.state = State::Train;
                self.status = String::from("Training agent...");
                log::info!("training for {} episodes", self.total_episodes);
            }
            KeyCode::Char('p') if self.state != State::Train => {
                self.reset_board().map_err(io::Error::other)?;
                self.selected_tab = 0;
                self.state = State::Play;
                self.status = String::from("Playing game...");
                self.last_tick = Instant::now();
            }
            KeyCode::Char('r') if self.state != State::Train => {
                self.reset_board().map_err(io::Error::other)?;
                self.state = State::Idle;
                self.status = String::from("Board reset!");
            }
            KeyCode::Left if self.selected_tab == 1 => self.plots.prev_plot(),
            KeyCode::Right if self.selected_tab == 1 => self.plots.next_plot(),
            _ => {}
        }

        Ok(())
    }

    /// Run a slice of the training loop, then yield back to the renderer
    fn train_chunk(&mut self) -> error::Result<()> {
        for _ in 0..EPISODES_PER_FRAME {
            if self.episode >= self.total_episodes {
                self.state = State::Idle;
                self.status = String::from("Training complete!");
                log::info!(
                    "training complete after {} episodes, epsilon {:.3}",
                    self.total_episodes,
                    self.agent.epsilon()
                );
                self.reset_board()?;
                return Ok(());
            }

            let (reward, steps) = self.train_episode()?;
            self.episode += 1;
            self.plots.update(Update {
                episode: self.episode,
                data: vec![reward as f64, steps as f64],
            });
            if self.episode % 100 == 0 {
                log::debug!(
                    "episode {}/{}: reward {reward}, steps {steps}, epsilon {:.3}",
                    self.episode,
                    self.total_episodes,
                    self.agent.epsilon()
                );
            }
        }

        Ok(())
    }

    fn train_episode(&mut self) -> error::Result<(f32, u32)> {
        let mut state = self.env.reset(self.size, self.mine_probability)?;
        let mut total_reward = 0.0;
        let mut steps = 0;

        loop {
            let action = self.agent.select_action(state)?;
            let (next_state, reward, done) = self.env.step(Action::try_from(action)?)?;
            self.agent.update(state, action, reward, next_state)?;
            state = next_state;
            total_reward += reward;
            steps += 1;
            if done {
                return Ok((total_reward, steps));
            }
        }
    }

    /// Replay one move of the learned policy
    fn play_step(&mut self) -> error::Result<()> {
        let action = self.agent.select_action(self.env.state())?;
        let (_, reward, done) = self.env.step(Action::try_from(action)?)?;

        if done {
            self.state = State::Idle;
            self.status = if reward > 0.0 {
                String::from("Success! Goal reached!")
            } else {
                String::from("Game over! Hit a mine!")
            };
            log::info!("game over: {}", self.status);
        }

        Ok(())
    }

    fn reset_board(&mut self) -> error::Result<()> {
        self.env.reset(self.size, self.mine_probability)?;
        log::debug!("new {0}x{0} board with {1} mines", self.size, self.env.mines());
        Ok(())
    }
}

impl<D: Decay> Widget for &App<D> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Layout
        let [menu_area, main_area, status_area, progress_area] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Fill(1),
            Constraint::Length(1),
            Constraint::Length(3),
        ])
        .areas(area);

        // Menu
        Tabs::new(TABS)
            .block(Block::default().padding(Padding::uniform(1)))
            .white()
            .bold()
            .highlight_style(Style::default().light_green())
            .select(self.selected_tab)
            .render(menu_area, buf);

        // Main
        match self.selected_tab {
            0 => Board::new(&self.env).render(main_area, buf),
            1 => self.plots.render(main_area, buf),
            2 => self.logs.render_ref(main_area, buf),
            _ => {}
        }

        // Status line
        Paragraph::new(self.status.as_str())
            .alignment(Alignment::Center)
            .render(status_area, buf);

        // Progress Bar
        Gauge::default()
            .block(
                Block::bordered()
                    .border_type(BorderType::Rounded)
                    .title("Progress"),
            )
            .gauge_style(Color::Cyan)
            .ratio(f64::from(self.episode) / f64::from(self.total_episodes.max(1)))
            .render(progress_area, buf);

        if self.show_help {
            render_help(area, buf, self.selected_tab);
        }
    }
}
