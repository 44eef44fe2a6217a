//! Application loop: event routing, action processing, rendering.

use color_eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::layout::{Constraint, Layout, Rect};
use tokio::sync::mpsc;
use tracing::{debug, error};

use crate::{
    action::Action,
    cli::Cli,
    components::{
        Component, footer::Footer, form_view::FormView, header::Header,
        progress::ProgressGauge, records::RecordTables, type_picker::TypePicker,
    },
    config::Config,
    state::{Focus, InputMode, State},
    tui::{Event, EventResponse, Frame, Tui},
};

pub struct App {
    pub config: Config,
    pub components: Vec<Box<dyn Component>>,
    pub footer: Footer,
    pub popup: Option<Box<dyn Component>>,
    pub should_quit: bool,
    pub should_suspend: bool,
    pub state: State,
    tick_rate: f64,
    frame_rate: f64,
    initial_form_type: Option<String>,
}

impl App {
    pub fn new(args: Cli) -> Result<Self> {
        let config = Config::new()?;
        let state = State::new()?;
        let tick_rate = args.tick_rate.unwrap_or(config.config.tick_rate);
        let frame_rate = args.frame_rate.unwrap_or(config.config.frame_rate);
        let initial_form_type = args
            .form_type
            .clone()
            .or_else(|| config.config.default_form_type.clone());

        Ok(Self {
            components: vec![
                Box::new(Header::new()),
                Box::new(FormView::new()),
                Box::new(ProgressGauge::new()),
                Box::new(RecordTables::new()),
            ],
            footer: Footer::new(),
            popup: None,
            should_quit: false,
            should_suspend: false,
            state,
            tick_rate,
            frame_rate,
            initial_form_type,
            config,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        let (action_tx, mut action_rx) = mpsc::unbounded_channel::<Action>();

        let mut tui = Tui::new()?
            .tick_rate(self.tick_rate)
            .frame_rate(self.frame_rate);
        tui.enter()?;

        for component in self.components.iter_mut() {
            component.init(&self.state)?;
        }
        self.footer.init(&self.state)?;

        if let Some(name) = self.initial_form_type.take() {
            action_tx.send(Action::SelectFormType(name))?;
        }

        loop {
            if let Some(e) = tui.next().await {
                let mut stop_event_propagation = self
                    .popup
                    .as_mut()
                    .and_then(|popup| popup.handle_events(e.clone(), &mut self.state).ok())
                    .map(|response| match response {
                        Some(EventResponse::Continue(action)) => {
                            action_tx.send(action).ok();
                            false
                        }
                        Some(EventResponse::Stop(action)) => {
                            action_tx.send(action).ok();
                            true
                        }
                        _ => false,
                    })
                    .unwrap_or(false);

                // An open popup is modal: input never falls through to the page.
                if self.popup.is_some()
                    && matches!(e, Event::Key(_) | Event::Mouse(_) | Event::Paste(_))
                {
                    stop_event_propagation = true;
                }

                if !stop_event_propagation {
                    for component in self.components.iter_mut() {
                        match component.handle_events(e.clone(), &mut self.state)? {
                            Some(EventResponse::Continue(action)) => {
                                action_tx.send(action)?;
                            }
                            Some(EventResponse::Stop(action)) => {
                                action_tx.send(action)?;
                                stop_event_propagation = true;
                                break;
                            }
                            None => {}
                        }
                    }
                }

                if !stop_event_propagation {
                    match e {
                        Event::Tick => action_tx.send(Action::Tick)?,
                        Event::Render => action_tx.send(Action::Render)?,
                        Event::Resize(x, y) => action_tx.send(Action::Resize(x, y))?,
                        Event::Key(key) => {
                            if let Some(action) = self.global_key_action(&key) {
                                action_tx.send(action)?;
                            }
                        }
                        _ => {}
                    }
                }
            }

            while let Ok(action) = action_rx.try_recv() {
                if action != Action::Tick && action != Action::Render {
                    debug!("{action:?}");
                }
                match &action {
                    Action::Quit => self.should_quit = true,
                    Action::Suspend => self.should_suspend = true,
                    Action::Resume => self.should_suspend = false,
                    Action::Resize(w, h) => {
                        tui.resize(Rect::new(0, 0, *w, *h))?;
                        tui.draw(|f| {
                            self.render(f).unwrap_or_else(|err| {
                                action_tx
                                    .send(Action::Error(format!("Failed to draw: {:?}", err)))
                                    .unwrap();
                            })
                        })?;
                    }
                    Action::Render => {
                        tui.draw(|f| {
                            self.render(f).unwrap_or_else(|err| {
                                action_tx
                                    .send(Action::Error(format!("Failed to draw: {:?}", err)))
                                    .unwrap();
                            })
                        })?;
                    }
                    Action::FocusNext => self.state.focus = self.state.focus.next(),
                    Action::FocusPrev => self.state.focus = self.state.focus.next(),
                    Action::OpenTypePicker => {
                        let names = self.state.controller.type_names();
                        let current = self.state.controller.form_type().map(str::to_string);
                        self.popup = Some(Box::new(TypePicker::new(names, current)));
                    }
                    Action::ClosePopup => self.popup = None,
                    Action::SelectFormType(name) => {
                        self.popup = None;
                        match self.state.controller.select_form_type(name).await {
                            Ok(()) => self.state.info(format!("Composing: {name}")),
                            Err(e) => self.state.error(e.to_string()),
                        }
                    }
                    Action::FieldChanged { name, value } => {
                        if let Err(e) = self.state.controller.update_field(name, value.clone()) {
                            self.state.error(e.to_string());
                        }
                    }
                    Action::Submit => match self.state.controller.submit() {
                        Ok(id) => self.state.info(format!("Record {id} stored")),
                        Err(e) => self.state.error(e.to_string()),
                    },
                    Action::EditRecord(id) => match self.state.controller.edit(*id) {
                        Ok(()) => {
                            self.state.focus = Focus::Form;
                            self.state.info("Editing record — submit to update");
                        }
                        Err(e) => self.state.error(e.to_string()),
                    },
                    Action::DeleteRecord { form_type, id } => {
                        self.state.controller.delete(form_type, *id);
                        self.state.info("Record deleted");
                    }
                    Action::StatusInfo(message) => self.state.info(message.clone()),
                    Action::Error(message) => {
                        error!("{message}");
                        self.state.error(message.clone());
                    }
                    _ => {}
                }

                // Let the popup or the page components react to what happened.
                if let Some(popup) = &mut self.popup {
                    if let Some(follow_up) = popup.update(action.clone(), &mut self.state)? {
                        action_tx.send(follow_up)?;
                    }
                } else {
                    for component in self.components.iter_mut() {
                        if let Some(follow_up) =
                            component.update(action.clone(), &mut self.state)?
                        {
                            action_tx.send(follow_up)?;
                        }
                    }
                }
                if let Some(follow_up) = self.footer.update(action.clone(), &mut self.state)? {
                    action_tx.send(follow_up)?;
                }
            }

            if self.should_suspend {
                tui.suspend()?;
                action_tx.send(Action::Resume)?;
                tui = Tui::new()?
                    .tick_rate(self.tick_rate)
                    .frame_rate(self.frame_rate);
                tui.enter()?;
            } else if self.should_quit {
                tui.stop()?;
                break;
            }
        }
        tui.exit()?;
        Ok(())
    }

    /// Keys not claimed by any component. Mode gating happens here: plain
    /// letters only act in normal mode, so typing into a field never quits.
    fn global_key_action(&self, key: &KeyEvent) -> Option<Action> {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('c') => Some(Action::Quit),
                KeyCode::Char('z') => Some(Action::Suspend),
                _ => None,
            };
        }
        if self.state.input_mode != InputMode::Normal {
            return None;
        }
        match key.code {
            KeyCode::Char('q') => Some(Action::Quit),
            KeyCode::Tab => Some(Action::FocusNext),
            KeyCode::BackTab => Some(Action::FocusPrev),
            KeyCode::Char('t') => Some(Action::OpenTypePicker),
            KeyCode::Char('s') => Some(Action::Submit),
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame<'_>) -> Result<()> {
        let mut constraints: Vec<Constraint> = self
            .components
            .iter()
            .map(|c| c.height_constraint())
            .collect();
        constraints.push(self.footer.height_constraint());
        let areas = Layout::vertical(constraints).split(frame.area());

        for (component, area) in self.components.iter_mut().zip(areas.iter()) {
            component.draw(frame, *area, &self.state)?;
        }
        self.footer
            .draw(frame, *areas.last().expect("footer area"), &self.state)?;

        if let Some(popup) = &mut self.popup {
            popup.draw(frame, frame.area(), &self.state)?;
        }
        Ok(())
    }
}
