/// Every user interaction produces an Action; the app loop is the only
/// place they are interpreted.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Action {
    // Home menu
    StartPurchase,
    StartCheckIn,
    StartCheckOut,
    ViewSeats,

    // Select-user screen
    ChooseMember,
    ChooseNonMember,

    // Lists and the seat grid
    MoveSelection(i32),
    MoveCursor(i32, i32),
    Confirm,

    // Text entry (phone, PIN)
    InputPush(char),
    InputPop,
    NextField,

    // Modals
    Acknowledge,
    InsertCard,
    RetryPayment,
    PaymentGoHome,

    GoBack,
    Quit,
}
