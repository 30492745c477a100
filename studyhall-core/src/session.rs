use crate::api::{CheckInRequest, CheckOutRequest};
use crate::seat::{OccupantRole, Seat};
use crate::ticket::{MemberInfo, PaymentResult, Ticket};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CheckInStep {
    Login,
    Seat,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CheckOutStep {
    Seat,
    Auth,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Screen {
    Home,
    SelectUser,
    MemberLogin,
    TicketList,
    SeatStatus,
    PhoneInput,
    CheckIn(CheckInStep),
    CheckOut(CheckOutStep),
    SeatView,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum UserType {
    Member,
    NonMember,
}

/// How the occupant of a seat proves it is theirs at check-out.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CheckOutAuth {
    /// Guests re-enter the phone number they checked in with.
    Phone,
    /// Members enter their account PIN.
    Pin,
}

/// Where a ticket selection goes next.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TicketRoute {
    /// Open the card payment modal.
    Pay,
    /// Non-member purchase needs a verified phone first.
    EnterPhone,
}

/// Where the phone-input screen goes after a valid number.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PhoneRoute {
    Pay,
    GoHome,
}

#[derive(Clone, Debug, PartialEq)]
pub enum PaymentRoute {
    /// Member paid; a seat still has to be assigned.
    PickSeat,
    /// Non-member paid with a seat already chosen; check in now.
    CheckInNow(CheckInRequest),
    GoHome,
}

#[derive(Clone, Debug, PartialEq)]
pub enum SeatPick {
    /// Seat chosen with a payment pending; fire the combined call.
    CheckInNow(CheckInRequest),
    /// Plain selection; seat stored, back to the ticket list.
    ReturnToTickets,
    /// Check-out flow wants the occupant to authenticate.
    AuthRequired(CheckOutAuth),
    Ignored,
}

impl Screen {
    /// Static back-navigation table. Every screen has exactly one back
    /// target; there is no history stack to unwind.
    pub fn back_target(self, user_type: Option<UserType>) -> Screen {
        match self {
            Screen::Home => Screen::Home,
            Screen::SelectUser => Screen::Home,
            Screen::MemberLogin => Screen::SelectUser,
            Screen::TicketList => match user_type {
                Some(UserType::Member) => Screen::MemberLogin,
                _ => Screen::SeatStatus,
            },
            Screen::SeatStatus => match user_type {
                Some(UserType::Member) => Screen::TicketList,
                _ => Screen::SelectUser,
            },
            Screen::PhoneInput => Screen::TicketList,
            Screen::CheckIn(CheckInStep::Login) => Screen::Home,
            Screen::CheckIn(CheckInStep::Seat) => Screen::CheckIn(CheckInStep::Login),
            Screen::CheckOut(CheckOutStep::Seat) => Screen::Home,
            Screen::CheckOut(CheckOutStep::Auth) => Screen::CheckOut(CheckOutStep::Seat),
            Screen::SeatView => Screen::Home,
        }
    }
}

/// One visitor's walk through the kiosk. Holds what has been chosen so
/// far and decides each next screen; all side effects are returned as
/// routes for the caller to execute.
#[derive(Clone, Debug)]
pub struct KioskSession {
    pub screen: Screen,
    pub user_type: Option<UserType>,
    pub member: Option<MemberInfo>,
    pub phone: Option<String>,
    pub selected_ticket: Option<Ticket>,
    pub selected_seat: Option<u32>,
    pub check_out_seat: Option<u32>,
    pub check_out_auth: Option<CheckOutAuth>,
    payment: Option<PaymentResult>,
}

impl Default for KioskSession {
    fn default() -> Self {
        Self::new()
    }
}

impl KioskSession {
    pub fn new() -> Self {
        Self {
            screen: Screen::Home,
            user_type: None,
            member: None,
            phone: None,
            selected_ticket: None,
            selected_seat: None,
            check_out_seat: None,
            check_out_auth: None,
            payment: None,
        }
    }

    /// Back to the home screen with nothing carried over.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn payment(&self) -> Option<&PaymentResult> {
        self.payment.as_ref()
    }

    pub fn start_purchase(&mut self) {
        self.reset();
        self.screen = Screen::SelectUser;
    }

    pub fn start_check_in(&mut self) {
        self.reset();
        self.screen = Screen::CheckIn(CheckInStep::Login);
    }

    pub fn start_check_out(&mut self) {
        self.reset();
        self.screen = Screen::CheckOut(CheckOutStep::Seat);
    }

    pub fn view_seats(&mut self) {
        self.reset();
        self.screen = Screen::SeatView;
    }

    pub fn choose_user_type(&mut self, user_type: UserType) {
        self.user_type = Some(user_type);
        self.screen = match user_type {
            UserType::Member => Screen::MemberLogin,
            UserType::NonMember => Screen::SeatStatus,
        };
    }

    /// Login succeeded, either on the purchase path or inside the
    /// standalone check-in flow.
    pub fn login_succeeded(&mut self, member: MemberInfo) {
        self.phone = Some(member.phone.clone());
        self.member = Some(member);
        self.screen = match self.screen {
            Screen::CheckIn(CheckInStep::Login) => Screen::CheckIn(CheckInStep::Seat),
            _ => Screen::TicketList,
        };
    }

    pub fn select_ticket(&mut self, ticket: Ticket) -> TicketRoute {
        self.selected_ticket = Some(ticket);
        match self.user_type {
            Some(UserType::Member) => TicketRoute::Pay,
            _ => {
                self.screen = Screen::PhoneInput;
                TicketRoute::EnterPhone
            }
        }
    }

    /// Phone entered on the non-member purchase path. With no ticket
    /// selected there is nothing to pay for.
    pub fn phone_submitted(&mut self, phone: String) -> PhoneRoute {
        self.phone = Some(phone);
        if self.selected_ticket.is_some() {
            PhoneRoute::Pay
        } else {
            self.reset();
            PhoneRoute::GoHome
        }
    }

    /// Payment modal handed over its result. Ignored unless a ticket was
    /// selected; a result must never outlive the ticket it paid for.
    pub fn payment_completed(&mut self, result: PaymentResult) -> PaymentRoute {
        if self.selected_ticket.is_none() {
            log::warn!("payment result {} dropped: no ticket selected", result.order_id);
            self.reset();
            return PaymentRoute::GoHome;
        }
        self.payment = Some(result.clone());
        match self.user_type {
            Some(UserType::Member) => {
                self.screen = Screen::SeatStatus;
                PaymentRoute::PickSeat
            }
            _ => match (self.phone.clone(), self.selected_seat) {
                (Some(phone), Some(seat_id)) => PaymentRoute::CheckInNow(CheckInRequest {
                    phone,
                    seat_id,
                    order_id: Some(result.order_id),
                }),
                _ => {
                    self.reset();
                    PaymentRoute::GoHome
                }
            },
        }
    }

    /// A seat passed the click policy; route by which flow we are in.
    pub fn pick_seat(&mut self, seat: &Seat) -> SeatPick {
        match self.screen {
            Screen::SeatStatus => {
                if let (Some(payment), Some(phone)) = (&self.payment, &self.phone) {
                    SeatPick::CheckInNow(CheckInRequest {
                        phone: phone.clone(),
                        seat_id: seat.seat_id,
                        order_id: Some(payment.order_id),
                    })
                } else {
                    self.selected_seat = Some(seat.seat_id);
                    self.screen = Screen::TicketList;
                    SeatPick::ReturnToTickets
                }
            }
            Screen::CheckIn(CheckInStep::Seat) => match &self.phone {
                Some(phone) => SeatPick::CheckInNow(CheckInRequest {
                    phone: phone.clone(),
                    seat_id: seat.seat_id,
                    order_id: None,
                }),
                None => SeatPick::Ignored,
            },
            Screen::CheckOut(CheckOutStep::Seat) => {
                let auth = match seat.occupant_role() {
                    Some(OccupantRole::Member) => CheckOutAuth::Pin,
                    Some(OccupantRole::Guest) => CheckOutAuth::Phone,
                    None => return SeatPick::Ignored,
                };
                self.check_out_seat = Some(seat.seat_id);
                self.check_out_auth = Some(auth);
                self.screen = Screen::CheckOut(CheckOutStep::Auth);
                SeatPick::AuthRequired(auth)
            }
            _ => SeatPick::Ignored,
        }
    }

    /// Credential entered on the check-out auth screen.
    pub fn check_out_request(&self, credential: &str) -> Option<CheckOutRequest> {
        let seat_id = self.check_out_seat?;
        match self.check_out_auth? {
            CheckOutAuth::Phone => Some(CheckOutRequest {
                seat_id,
                phone: Some(credential.to_string()),
                pin: None,
            }),
            CheckOutAuth::Pin => Some(CheckOutRequest {
                seat_id,
                phone: None,
                pin: Some(credential.to_string()),
            }),
        }
    }

    pub fn go_back(&mut self) {
        self.screen = self.screen.back_target(self.user_type);
        if self.screen == Screen::Home {
            self.reset();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seat::{SeatKind, SeatStatus};
    use crate::ticket::TicketKind;

    fn member() -> MemberInfo {
        MemberInfo {
            member_id: 7,
            name: "Hana".to_string(),
            phone: "010-1234-5678".to_string(),
            role: OccupantRole::Member,
            saved_time_minute: 120,
            has_period_pass: false,
        }
    }

    fn time_ticket() -> Ticket {
        Ticket {
            product_id: 2,
            name: "2시간권".to_string(),
            price: 4000,
            kind: TicketKind::Time,
        }
    }

    fn payment() -> PaymentResult {
        PaymentResult {
            product_name: "2시간권".to_string(),
            price: 4000,
            order_id: 42,
        }
    }

    fn free_seat(seat_id: u32) -> Seat {
        Seat::available(seat_id, SeatKind::Free)
    }

    fn occupied_seat(seat_id: u32, role: OccupantRole) -> Seat {
        Seat {
            seat_id,
            kind: SeatKind::Free,
            status: SeatStatus::Occupied {
                user_name: "Juno".to_string(),
                role,
                expires_at: None,
            },
        }
    }

    #[test]
    fn test_member_purchase_walk() {
        let mut session = KioskSession::new();
        session.start_purchase();
        assert_eq!(session.screen, Screen::SelectUser);
        session.choose_user_type(UserType::Member);
        assert_eq!(session.screen, Screen::MemberLogin);
        session.login_succeeded(member());
        assert_eq!(session.screen, Screen::TicketList);
        assert_eq!(session.select_ticket(time_ticket()), TicketRoute::Pay);
        assert_eq!(session.payment_completed(payment()), PaymentRoute::PickSeat);
        assert_eq!(session.screen, Screen::SeatStatus);

        // Seat pick with a pending payment fires the combined call.
        let pick = session.pick_seat(&free_seat(11));
        assert_eq!(
            pick,
            SeatPick::CheckInNow(CheckInRequest {
                phone: "010-1234-5678".to_string(),
                seat_id: 11,
                order_id: Some(42),
            })
        );
    }

    #[test]
    fn test_non_member_routes_through_phone_input() {
        let mut session = KioskSession::new();
        session.start_purchase();
        session.choose_user_type(UserType::NonMember);
        assert_eq!(session.screen, Screen::SeatStatus);
        // Plain seat selection goes back to the ticket list.
        assert_eq!(session.pick_seat(&free_seat(3)), SeatPick::ReturnToTickets);
        assert_eq!(session.screen, Screen::TicketList);
        assert_eq!(session.select_ticket(time_ticket()), TicketRoute::EnterPhone);
        assert_eq!(session.screen, Screen::PhoneInput);
        assert_eq!(
            session.phone_submitted("010-9876-5432".to_string()),
            PhoneRoute::Pay
        );
        let route = session.payment_completed(payment());
        assert_eq!(
            route,
            PaymentRoute::CheckInNow(CheckInRequest {
                phone: "010-9876-5432".to_string(),
                seat_id: 3,
                order_id: Some(42),
            })
        );
    }

    #[test]
    fn test_payment_without_ticket_is_dropped() {
        let mut session = KioskSession::new();
        session.start_purchase();
        session.choose_user_type(UserType::Member);
        assert_eq!(session.payment_completed(payment()), PaymentRoute::GoHome);
        assert_eq!(session.payment(), None);
        assert_eq!(session.screen, Screen::Home);
    }

    #[test]
    fn test_standalone_check_in_omits_order_id() {
        let mut session = KioskSession::new();
        session.start_check_in();
        assert_eq!(session.screen, Screen::CheckIn(CheckInStep::Login));
        session.login_succeeded(member());
        assert_eq!(session.screen, Screen::CheckIn(CheckInStep::Seat));
        let pick = session.pick_seat(&free_seat(8));
        assert_eq!(
            pick,
            SeatPick::CheckInNow(CheckInRequest {
                phone: "010-1234-5678".to_string(),
                seat_id: 8,
                order_id: None,
            })
        );
    }

    #[test]
    fn test_check_out_auth_routed_by_occupant_role() {
        let mut session = KioskSession::new();
        session.start_check_out();
        let pick = session.pick_seat(&occupied_seat(5, OccupantRole::Guest));
        assert_eq!(pick, SeatPick::AuthRequired(CheckOutAuth::Phone));
        let request = session.check_out_request("010-5555-6666").unwrap();
        assert_eq!(request.phone.as_deref(), Some("010-5555-6666"));
        assert_eq!(request.pin, None);

        let mut session = KioskSession::new();
        session.start_check_out();
        let pick = session.pick_seat(&occupied_seat(6, OccupantRole::Member));
        assert_eq!(pick, SeatPick::AuthRequired(CheckOutAuth::Pin));
        let request = session.check_out_request("0419").unwrap();
        assert_eq!(request.pin.as_deref(), Some("0419"));
        assert_eq!(request.phone, None);
    }

    #[test]
    fn test_back_target_table_is_total() {
        let screens = [
            Screen::Home,
            Screen::SelectUser,
            Screen::MemberLogin,
            Screen::TicketList,
            Screen::SeatStatus,
            Screen::PhoneInput,
            Screen::CheckIn(CheckInStep::Login),
            Screen::CheckIn(CheckInStep::Seat),
            Screen::CheckOut(CheckOutStep::Seat),
            Screen::CheckOut(CheckOutStep::Auth),
            Screen::SeatView,
        ];
        for user_type in [None, Some(UserType::Member), Some(UserType::NonMember)] {
            for screen in screens {
                // Repeated back always terminates at Home.
                let mut current = screen;
                for _ in 0..screens.len() {
                    current = current.back_target(user_type);
                }
                assert_eq!(current, Screen::Home, "{screen:?} ({user_type:?})");
            }
        }
    }

    #[test]
    fn test_back_target_depends_on_user_type() {
        assert_eq!(
            Screen::TicketList.back_target(Some(UserType::Member)),
            Screen::MemberLogin
        );
        assert_eq!(
            Screen::TicketList.back_target(Some(UserType::NonMember)),
            Screen::SeatStatus
        );
        assert_eq!(
            Screen::SeatStatus.back_target(Some(UserType::Member)),
            Screen::TicketList
        );
        assert_eq!(
            Screen::SeatStatus.back_target(Some(UserType::NonMember)),
            Screen::SelectUser
        );
    }

    #[test]
    fn test_going_back_to_home_clears_session() {
        let mut session = KioskSession::new();
        session.start_purchase();
        session.choose_user_type(UserType::NonMember);
        session.pick_seat(&free_seat(3));
        session.go_back(); // TicketList -> SeatStatus
        session.go_back(); // SeatStatus -> SelectUser
        session.go_back(); // SelectUser -> Home
        assert_eq!(session.screen, Screen::Home);
        assert_eq!(session.selected_seat, None);
        assert_eq!(session.user_type, None);
    }
}
