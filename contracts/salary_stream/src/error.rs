use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum SalaryError {
    /// Raised when the caller does not hold the admin credential.
    NotAuthorized = 1,
    /// Raised when the employment relation already exists.
    AlreadyEmployee = 2,
    /// Raised when the employment relation does not exist.
    AlreadyNotAnEmployee = 3,
    /// Raised when the caller has no relation with the employee.
    NotAdminForEmployee = 4,
    /// Raised when the caller administers the employee but does not own the
    /// schedule.
    NotAdminForThisSalary = 5,
    /// Raised when the caller is not the schedule's employee.
    NotEmployeeForThisSalary = 6,
    /// Raised when the schedule id does not exist.
    SalaryNotFound = 7,
    /// Raised when the employer/employee pair already has a schedule.
    SalaryAlreadyExists = 8,
    /// Raised when every period of the schedule has already elapsed.
    SalaryEnded = 9,
    /// Raised when the period duration is zero.
    InvalidPeriodDuration = 10,
    /// Raised when the period list is too short or a count is zero.
    InvalidAmountOfPeriods = 11,
    /// Raised when a per-period amount is below one unit.
    InvalidPeriodAmount = 12,
    /// Raised when the employer's allowance cannot cover the deposit.
    NotEnoughTokensAllowed = 13,
    /// Raised when removal would touch periods that have begun accruing.
    PeriodsAlreadyAccrued = 14,
    /// Raised when a name is empty.
    EmptyName = 15,
    /// Raised when the caller may not set this employee's name.
    NotAllowedToSetName = 16,
    /// Raised when the caller may not remove this employee's name.
    NotAllowedToRemoveName = 17,
}
