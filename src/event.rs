/// Events that can occur in the application.
/// Handlers return these instead of mutating app state directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEvent {
    // Table navigation
    RowDown,
    RowUp,
    NextPage,
    PrevPage,

    // Filters
    CycleLevel,
    Refresh,

    // Search input
    FocusSearch,
    SearchChar(char),
    SearchBackspace,
    SearchClear,
    SearchSubmit,
    SearchBlur,
    SuggestionDown,
    SuggestionUp,

    // Detail panel
    OpenDetail,
    CloseDetail,
    MouseClick { column: u16, row: u16 },

    // Help
    ShowHelp,
    HideHelp,

    Quit,
}
