use ratatui::widgets::TableState;
use tokio::runtime::Handle;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, warn};

use geodo_core::{
    parse_task_input, ApiClient, ApiError, AuthApi, FetchTicket, FileSessionStore, LocationService,
    LoginInfo, PlaceDraft, SessionContext, Task, TaskInput, TaskListController, TaskLocation,
    TaskRepository, TaskService,
};

pub enum InputMode {
    Normal,
    Login,
    Adding,
    Modifying,
    Locating,
    ConfirmDelete,
}

/// Results coming back from spawned requests.
pub enum AppEvent {
    Listed(FetchTicket, Result<Vec<Task>, ApiError>),
    Mutated(&'static str, Result<(), ApiError>),
    LocationLoaded(i64, Result<Option<TaskLocation>, ApiError>),
    LocationSaved(i64, Result<(), ApiError>),
    /// `Ok(false)` when the task had no location to remove.
    LocationCleared(i64, Result<bool, ApiError>),
    LoggedIn(Result<LoginInfo, ApiError>),
}

pub struct Notice {
    pub text: String,
    pub is_error: bool,
}

pub struct App {
    runtime: Handle,
    client: ApiClient,
    store: FileSessionStore,
    tx: UnboundedSender<AppEvent>,
    rx: UnboundedReceiver<AppEvent>,
    pub session: SessionContext,
    pub controller: TaskListController,
    pub state: TableState,
    pub location: Option<(i64, Option<TaskLocation>)>,
    pub notice: Option<Notice>,
    pub input: String,
    pub input_mode: InputMode,
    pub cursor_position: usize,
}

impl App {
    pub fn new(runtime: Handle, client: ApiClient, session: SessionContext, store: FileSessionStore) -> App {
        let (tx, rx) = mpsc::unbounded_channel();
        let logged_in = session.session().is_some();
        let mut app = App {
            runtime,
            client,
            store,
            tx,
            rx,
            session,
            controller: TaskListController::new(),
            state: TableState::default(),
            location: None,
            notice: None,
            input: String::new(),
            input_mode: InputMode::Normal,
            cursor_position: 0,
        };
        if logged_in {
            let ticket = app.controller.mount();
            app.fetch(ticket);
        } else {
            app.enter_mode(InputMode::Login);
        }
        app
    }

    /// Applies everything that finished since the last frame.
    pub fn drain_events(&mut self) {
        while let Ok(event) = self.rx.try_recv() {
            self.handle_event(event);
        }
    }

    fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Listed(ticket, result) => {
                if let Err(e) = &result {
                    if e.is_unauthorized() {
                        self.end_session();
                    }
                }
                self.controller.apply(ticket, result);
                self.clamp_selection();
            }
            AppEvent::Mutated(what, Ok(())) => {
                self.notify(format!("Task {}", what), false);
                let ticket = self.controller.invalidate();
                self.fetch(ticket);
            }
            AppEvent::Mutated(what, Err(e)) => {
                warn!(action = what, error = %e, "task mutation failed");
                self.report(e);
            }
            AppEvent::LocationLoaded(task_id, Ok(location)) => {
                self.location = Some((task_id, location));
            }
            AppEvent::LocationLoaded(_, Err(e)) => self.report(e),
            AppEvent::LocationSaved(task_id, Ok(())) => {
                self.notify("Task location saved".to_string(), false);
                self.fetch_location(task_id);
            }
            AppEvent::LocationCleared(task_id, Ok(removed)) => {
                let text = if removed { "Task location cleared" } else { "Task has no location" };
                self.notify(text.to_string(), false);
                self.location = Some((task_id, None));
            }
            AppEvent::LocationSaved(_, Err(e)) | AppEvent::LocationCleared(_, Err(e)) => {
                warn!(error = %e, "location change failed");
                self.report(e);
            }
            AppEvent::LoggedIn(Ok(info)) => {
                let session = self.session.login(info).clone();
                if let Err(e) = self.store.save(&session) {
                    warn!(error = %e, "could not persist session");
                }
                self.client.set_token(Some(session.access_token.clone()));
                self.notify(format!("Welcome, {}", session.user.username), false);
                self.exit_input_mode();
                let ticket = self.controller.mount();
                self.fetch(ticket);
            }
            AppEvent::LoggedIn(Err(e)) => {
                self.notify(e.user_message(), true);
                self.enter_mode(InputMode::Login);
            }
        }
    }

    fn report(&mut self, e: ApiError) {
        if e.is_unauthorized() {
            self.end_session();
        }
        self.notify(e.user_message(), true);
    }

    fn end_session(&mut self) {
        self.session.expire();
        self.client.set_token(None);
        if let Err(e) = self.store.clear() {
            warn!(error = %e, "could not remove session file");
        }
        self.enter_mode(InputMode::Login);
    }

    pub fn logout(&mut self) {
        self.session.logout();
        self.client.set_token(None);
        if let Err(e) = self.store.clear() {
            warn!(error = %e, "could not remove session file");
        }
        self.notify("Logged out".to_string(), false);
        self.enter_mode(InputMode::Login);
    }

    fn notify(&mut self, text: String, is_error: bool) {
        self.notice = Some(Notice { text, is_error });
    }

    fn fetch(&self, ticket: FetchTicket) {
        let client = self.client.clone();
        let tx = self.tx.clone();
        debug!(generation = ticket.generation, "spawning task list fetch");
        self.runtime.spawn(async move {
            let result = client.list(ticket.filter).await;
            let _ = tx.send(AppEvent::Listed(ticket, result));
        });
    }

    pub fn selected_task(&self) -> Option<&Task> {
        self.state.selected().and_then(|i| self.controller.tasks().get(i))
    }

    pub fn next(&mut self) {
        let len = self.controller.tasks().len();
        if len == 0 { return; }

        let i = match self.state.selected() {
            Some(i) => {
                if i >= len - 1 {
                    0
                } else {
                    i + 1
                }
            }
            None => 0,
        };
        self.state.select(Some(i));
    }

    pub fn previous(&mut self) {
        let len = self.controller.tasks().len();
        if len == 0 { return; }

        let i = match self.state.selected() {
            Some(i) => {
                if i == 0 {
                    len - 1
                } else {
                    i - 1
                }
            }
            None => 0,
        };
        self.state.select(Some(i));
    }

    fn clamp_selection(&mut self) {
        let len = self.controller.tasks().len();
        if len == 0 {
            self.state.select(None);
        } else {
            let i = self.state.selected().unwrap_or(0).min(len - 1);
            self.state.select(Some(i));
        }
    }

    pub fn cycle_priority(&mut self) {
        let next = self.controller.filter().priority.next();
        if let Some(ticket) = self.controller.set_priority(next) {
            self.fetch(ticket);
        }
    }

    pub fn cycle_done(&mut self) {
        let next = self.controller.filter().done.next();
        if let Some(ticket) = self.controller.set_done(next) {
            self.fetch(ticket);
        }
    }

    pub fn refresh(&mut self) {
        let ticket = self.controller.invalidate();
        self.fetch(ticket);
    }

    pub fn toggle_status(&mut self) {
        let Some(task) = self.selected_task() else { return };
        let id = task.id;
        let service = TaskService::new(self.client.clone());
        let session = self.session.clone();
        let tx = self.tx.clone();
        self.runtime.spawn(async move {
            let result = service.toggle(id, &session).await;
            let _ = tx.send(AppEvent::Mutated("updated", result));
        });
    }

    pub fn request_delete(&mut self) {
        if self.selected_task().is_some() {
            self.input_mode = InputMode::ConfirmDelete;
        }
    }

    pub fn confirm_delete(&mut self) {
        self.input_mode = InputMode::Normal;
        let Some(task) = self.selected_task() else { return };
        let id = task.id;
        let service = TaskService::new(self.client.clone());
        let session = self.session.clone();
        let tx = self.tx.clone();
        self.runtime.spawn(async move {
            let result = service.deactivate(id, &session).await;
            let _ = tx.send(AppEvent::Mutated("deleted", result));
        });
    }

    pub fn load_location(&mut self) {
        let Some(task) = self.selected_task() else { return };
        self.fetch_location(task.id);
    }

    fn fetch_location(&self, task_id: i64) {
        let service = LocationService::new(self.client.clone());
        let tx = self.tx.clone();
        self.runtime.spawn(async move {
            let result = service.location_for(task_id).await;
            let _ = tx.send(AppEvent::LocationLoaded(task_id, result));
        });
    }

    pub fn clear_location(&mut self) {
        let Some(task) = self.selected_task() else { return };
        let task_id = task.id;
        let service = LocationService::new(self.client.clone());
        let session = self.session.clone();
        let tx = self.tx.clone();
        self.location = None;
        self.runtime.spawn(async move {
            let result = service.remove(task_id, &session).await;
            let _ = tx.send(AppEvent::LocationCleared(task_id, result));
        });
    }

    pub fn enter_mode(&mut self, mode: InputMode) {
        if matches!(mode, InputMode::Modifying | InputMode::Locating) && self.selected_task().is_none() {
            return;
        }
        self.input_mode = mode;
        self.input.clear();
        self.cursor_position = 0;
    }

    pub fn exit_input_mode(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    pub fn input_char(&mut self, c: char) {
        let byte_index = self.input.chars().take(self.cursor_position).map(|c| c.len_utf8()).sum();
        self.input.insert(byte_index, c);
        self.cursor_position += 1;
    }

    pub fn delete_char(&mut self) {
        if self.cursor_position > 0 {
            let byte_index: usize = self.input.chars().take(self.cursor_position - 1).map(|c| c.len_utf8()).sum();
            self.input.remove(byte_index);
            self.cursor_position -= 1;
        }
    }

    pub fn move_cursor_left(&mut self) {
        if self.cursor_position > 0 {
            self.cursor_position -= 1;
        }
    }

    pub fn move_cursor_right(&mut self) {
        if self.cursor_position < self.input.chars().count() {
            self.cursor_position += 1;
        }
    }

    pub fn submit_command(&mut self) {
        if self.input.trim().is_empty() {
            if !matches!(self.input_mode, InputMode::Login) {
                self.exit_input_mode();
            }
            return;
        }

        match self.input_mode {
            InputMode::Login => self.submit_login(),
            InputMode::Adding => self.submit_save(None),
            InputMode::Modifying => {
                let existing = self.selected_task().cloned();
                if existing.is_some() {
                    self.submit_save(existing);
                }
            }
            InputMode::Locating => self.submit_location(),
            InputMode::Normal | InputMode::ConfirmDelete => {}
        }

        self.input.clear();
        self.cursor_position = 0;
        if !matches!(self.input_mode, InputMode::Login) {
            self.exit_input_mode();
        }
    }

    fn submit_login(&mut self) {
        let mut parts = self.input.split_whitespace();
        let (Some(username), Some(password)) = (parts.next(), parts.next()) else {
            self.notify("Usage: <username> <password>".to_string(), true);
            return;
        };
        let client = self.client.clone();
        let (username, password) = (username.to_string(), password.to_string());
        let tx = self.tx.clone();
        self.notify("Logging in...".to_string(), false);
        self.runtime.spawn(async move {
            let result = client.login(&username, &password).await;
            let _ = tx.send(AppEvent::LoggedIn(result));
        });
    }

    fn submit_save(&mut self, existing: Option<Task>) {
        let args: Vec<String> = self.input.split_whitespace().map(|s| s.to_string()).collect();
        let base = existing.as_ref().map(TaskInput::from_task);
        let input = match parse_task_input(&args, base) {
            Ok(input) => input,
            Err(e) => {
                self.notify(e.to_string(), true);
                return;
            }
        };
        let service = TaskService::new(self.client.clone());
        let session = self.session.clone();
        let tx = self.tx.clone();
        let what = if existing.is_some() { "updated" } else { "created" };
        self.runtime.spawn(async move {
            let result = service.save(existing.as_ref(), input, &session).await;
            let _ = tx.send(AppEvent::Mutated(what, result));
        });
    }

    fn submit_location(&mut self) {
        let Some(task) = self.selected_task() else { return };
        let task_id = task.id;
        let place = match parse_place(&self.input) {
            Ok(place) => place,
            Err(msg) => {
                self.notify(msg, true);
                return;
            }
        };
        let service = LocationService::new(self.client.clone());
        let session = self.session.clone();
        let tx = self.tx.clone();
        self.location = None;
        self.runtime.spawn(async move {
            let result = service.set(task_id, &place, &session).await;
            let _ = tx.send(AppEvent::LocationSaved(task_id, result));
        });
    }
}

/// `"<lat> <lon> <name words...>"` as typed into the location prompt.
pub fn parse_place(input: &str) -> Result<PlaceDraft, String> {
    let mut parts = input.split_whitespace();
    let lat = parts
        .next()
        .and_then(|s| s.parse::<f64>().ok())
        .ok_or("Usage: <lat> <lon> <name>")?;
    let lon = parts
        .next()
        .and_then(|s| s.parse::<f64>().ok())
        .ok_or("Usage: <lat> <lon> <name>")?;
    let name = parts.collect::<Vec<_>>().join(" ");
    let place = PlaceDraft {
        place_id: 0,
        display_name: name.clone(),
        name,
        lat,
        lon,
    };
    place.validate()?;
    Ok(place)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use axum::extract::{Path, Query, Request, State};
    use axum::http::StatusCode;
    use axum::middleware::{self, Next};
    use axum::response::Response;
    use axum::routing::{get, post};
    use axum::{Json, Router};
    use geodo_core::{FetchState, Priority, SessionEnd};
    use serde::Deserialize;
    use tokio::runtime::Runtime;

    #[derive(Default)]
    struct Server {
        requests: Vec<String>,
        location: Option<TaskLocation>,
    }

    type Shared = Arc<Mutex<Server>>;

    #[derive(Deserialize)]
    struct TaskIdParam {
        task_id: i64,
    }

    fn stored(task_id: i64, place: PlaceDraft) -> TaskLocation {
        TaskLocation {
            id: 1,
            place_id: place.place_id,
            display_name: place.display_name,
            name: place.name,
            lat: place.lat,
            lon: place.lon,
            task_id,
            geom: None,
        }
    }

    async fn record(State(db): State<Shared>, req: Request, next: Next) -> Response {
        let line = format!("{} {}", req.method(), req.uri().path());
        db.lock().unwrap().requests.push(line);
        next.run(req).await
    }

    async fn list() -> Json<serde_json::Value> {
        let task = Task {
            id: 4,
            title: "Buy stamps".to_string(),
            description: String::new(),
            done: false,
            priority: Priority::Medium,
            user_id: 1,
        };
        Json(serde_json::json!({ "tasks": [task] }))
    }

    async fn read(State(db): State<Shared>, Path(task_id): Path<i64>) -> Result<Json<TaskLocation>, StatusCode> {
        let db = db.lock().unwrap();
        match &db.location {
            Some(loc) if loc.task_id == task_id => Ok(Json(loc.clone())),
            _ => Err(StatusCode::NOT_FOUND),
        }
    }

    async fn create(
        State(db): State<Shared>,
        Query(q): Query<TaskIdParam>,
        Json(place): Json<PlaceDraft>,
    ) -> Result<Json<TaskLocation>, (StatusCode, Json<serde_json::Value>)> {
        let mut db = db.lock().unwrap();
        if db.location.is_some() {
            let detail = serde_json::json!({ "detail": "Location already exists for this task" });
            return Err((StatusCode::BAD_REQUEST, Json(detail)));
        }
        let loc = stored(q.task_id, place);
        db.location = Some(loc.clone());
        Ok(Json(loc))
    }

    async fn update(
        State(db): State<Shared>,
        Path(task_id): Path<i64>,
        Json(place): Json<PlaceDraft>,
    ) -> Result<Json<TaskLocation>, StatusCode> {
        let mut db = db.lock().unwrap();
        if db.location.is_none() {
            return Err(StatusCode::NOT_FOUND);
        }
        let loc = stored(task_id, place);
        db.location = Some(loc.clone());
        Ok(Json(loc))
    }

    async fn delete(State(db): State<Shared>) -> StatusCode {
        match db.lock().unwrap().location.take() {
            Some(_) => StatusCode::OK,
            None => StatusCode::NOT_FOUND,
        }
    }

    fn router(db: Shared) -> Router {
        Router::new()
            .route("/tasks/", get(list))
            .route("/locations/task", post(create))
            .route("/locations/task/{task_id}", get(read).put(update).delete(delete))
            .layer(middleware::from_fn_with_state(db.clone(), record))
            .with_state(db)
    }

    fn place(name: &str) -> PlaceDraft {
        PlaceDraft {
            place_id: 0,
            display_name: name.to_string(),
            name: name.to_string(),
            lat: 1.0,
            lon: 2.0,
        }
    }

    fn ana() -> LoginInfo {
        LoginInfo {
            id: 1,
            username: "ana".to_string(),
            email: "ana@example.com".to_string(),
            access_token: "jwt".to_string(),
        }
    }

    fn unauthorized() -> ApiError {
        ApiError::Server {
            status: StatusCode::UNAUTHORIZED,
            body: String::new(),
        }
    }

    /// A logged-in app whose first listing (task 4) has arrived.
    fn start(existing: Option<&str>) -> (Runtime, Shared, tempfile::TempDir, App) {
        let runtime = Runtime::new().unwrap();
        let db: Shared = Arc::new(Mutex::new(Server {
            location: existing.map(|name| stored(4, place(name))),
            ..Server::default()
        }));
        let base = runtime.block_on(async {
            let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
            let addr = listener.local_addr().unwrap();
            let router = router(db.clone());
            tokio::spawn(async move {
                axum::serve(listener, router).await.unwrap();
            });
            format!("http://{}/", addr)
        });

        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path().join("session.json")).unwrap();
        let mut session = SessionContext::new();
        store.save(session.login(ana())).unwrap();
        let client = ApiClient::new(&base, Duration::from_secs(5))
            .unwrap()
            .with_token(session.token().map(str::to_string));

        let mut app = App::new(runtime.handle().clone(), client, session, store);
        settle(&runtime, &mut app, |e| matches!(e, AppEvent::Listed(..)));
        (runtime, db, dir, app)
    }

    /// Handles incoming events until one matching `until` has been applied.
    fn settle(runtime: &Runtime, app: &mut App, until: impl Fn(&AppEvent) -> bool) {
        loop {
            let event = runtime
                .block_on(async { tokio::time::timeout(Duration::from_secs(5), app.rx.recv()).await })
                .expect("no event within 5s")
                .expect("event channel closed");
            let done = until(&event);
            app.handle_event(event);
            if done {
                return;
            }
        }
    }

    fn type_in(app: &mut App, text: &str) {
        for c in text.chars() {
            app.input_char(c);
        }
    }

    fn requests(db: &Shared) -> Vec<String> {
        db.lock().unwrap().requests.clone()
    }

    fn notice(app: &App) -> Option<(&str, bool)> {
        app.notice.as_ref().map(|n| (n.text.as_str(), n.is_error))
    }

    #[test]
    fn test_parse_place() {
        let place = parse_place("-23.55 -46.63 Praça da Sé").unwrap();
        assert_eq!(place.lat, -23.55);
        assert_eq!(place.lon, -46.63);
        assert_eq!(place.name, "Praça da Sé");
        assert_eq!(place.display_name, "Praça da Sé");
    }

    #[test]
    fn test_parse_place_errors() {
        assert!(parse_place("north 10 Somewhere").is_err());
        assert!(parse_place("10").is_err());
        assert!(parse_place("10 20").is_err());
        assert!(parse_place("95 20 Too far").is_err());
    }

    #[test]
    fn test_first_listing_selects_the_task() {
        let (_rt, _db, _dir, app) = start(None);
        assert_eq!(app.controller.state(), &FetchState::Populated);
        assert_eq!(app.selected_task().map(|t| t.id), Some(4));
    }

    #[test]
    fn test_location_prompt_updates_place_that_was_never_loaded() {
        let (rt, db, _dir, mut app) = start(Some("Home"));

        app.enter_mode(InputMode::Locating);
        type_in(&mut app, "1 2 Park");
        app.submit_command();
        settle(&rt, &mut app, |e| matches!(e, AppEvent::LocationSaved(..)));

        let seen = requests(&db);
        assert!(seen.contains(&"GET /locations/task/4".to_string()));
        assert!(seen.contains(&"PUT /locations/task/4".to_string()));
        assert!(!seen.iter().any(|r| r.starts_with("POST")));
        assert_eq!(notice(&app), Some(("Task location saved", false)));

        settle(&rt, &mut app, |e| matches!(e, AppEvent::LocationLoaded(..)));
        let shown = app.location.as_ref().and_then(|(_, loc)| loc.as_ref()).map(|l| l.name.clone());
        assert_eq!(shown.as_deref(), Some("Park"));
    }

    #[test]
    fn test_location_prompt_creates_when_task_has_none() {
        let (rt, db, _dir, mut app) = start(None);

        app.enter_mode(InputMode::Locating);
        type_in(&mut app, "1 2 Park");
        app.submit_command();
        settle(&rt, &mut app, |e| matches!(e, AppEvent::LocationSaved(..)));

        assert!(requests(&db).contains(&"POST /locations/task".to_string()));
        assert_eq!(db.lock().unwrap().location.as_ref().map(|l| l.task_id), Some(4));
    }

    #[test]
    fn test_clear_location_deletes_place_that_was_never_loaded() {
        let (rt, db, _dir, mut app) = start(Some("Home"));

        app.clear_location();
        settle(&rt, &mut app, |e| matches!(e, AppEvent::LocationCleared(..)));

        assert!(requests(&db).contains(&"DELETE /locations/task/4".to_string()));
        assert!(db.lock().unwrap().location.is_none());
        assert_eq!(notice(&app), Some(("Task location cleared", false)));
    }

    #[test]
    fn test_clear_location_without_place_sends_no_delete() {
        let (rt, db, _dir, mut app) = start(None);

        app.clear_location();
        settle(&rt, &mut app, |e| matches!(e, AppEvent::LocationCleared(..)));

        assert!(!requests(&db).iter().any(|r| r.starts_with("DELETE")));
        assert_eq!(notice(&app), Some(("Task has no location", false)));
    }

    #[test]
    fn test_successful_mutation_refetches() {
        let (rt, _db, _dir, mut app) = start(None);
        let before = app.controller.generation();

        app.handle_event(AppEvent::Mutated("updated", Ok(())));
        assert_eq!(app.controller.generation(), before + 1);
        assert!(app.controller.is_loading());
        assert_eq!(notice(&app), Some(("Task updated", false)));

        settle(&rt, &mut app, |e| matches!(e, AppEvent::Listed(..)));
        assert_eq!(app.controller.state(), &FetchState::Populated);
    }

    #[test]
    fn test_unauthorized_listing_expires_session() {
        let (_rt, _db, _dir, mut app) = start(None);
        let ticket = app.controller.invalidate();

        app.handle_event(AppEvent::Listed(ticket, Err(unauthorized())));

        assert_eq!(app.session.ended(), Some(SessionEnd::Expired));
        assert!(matches!(app.input_mode, InputMode::Login));
        assert!(app.store.load().unwrap().is_none());
    }

    #[test]
    fn test_unauthorized_mutation_expires_session() {
        let (_rt, _db, _dir, mut app) = start(None);

        app.handle_event(AppEvent::Mutated("deleted", Err(unauthorized())));

        assert_eq!(app.session.ended(), Some(SessionEnd::Expired));
        assert!(app.session.session().is_none());
        assert!(matches!(app.input_mode, InputMode::Login));
        assert_eq!(notice(&app), Some(("Session expired, please login again", true)));
    }

    #[test]
    fn test_login_mounts_the_list() {
        let (rt, _db, _dir, mut app) = start(None);
        app.logout();
        assert!(matches!(app.input_mode, InputMode::Login));

        app.handle_event(AppEvent::LoggedIn(Ok(ana())));
        assert!(matches!(app.input_mode, InputMode::Normal));
        assert!(app.controller.is_loading());
        assert_eq!(app.store.load().unwrap().map(|s| s.user.id), Some(1));

        settle(&rt, &mut app, |e| matches!(e, AppEvent::Listed(..)));
        assert_eq!(app.controller.tasks().len(), 1);
    }

    #[test]
    fn test_rejected_login_stays_on_prompt() {
        let (_rt, _db, _dir, mut app) = start(None);
        app.logout();

        app.handle_event(AppEvent::LoggedIn(Err(ApiError::BadCredentials)));
        assert!(matches!(app.input_mode, InputMode::Login));
        assert_eq!(notice(&app), Some(("Wrong username or password", true)));
    }
}
