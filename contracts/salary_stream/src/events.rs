use soroban_sdk::{contractevent, Address, Env};

/// Event: employment relation created.
#[contractevent]
#[derive(Clone, Debug)]
pub struct EmployeeAdded {
    pub admin: Address,
    pub employee: Address,
}

/// Event: employment relation removed.
#[contractevent]
#[derive(Clone, Debug)]
pub struct EmployeeRemoved {
    pub admin: Address,
    pub employee: Address,
}

/// Event: employee display name set.
#[contractevent]
#[derive(Clone, Debug)]
pub struct EmployeeNameSet {
    pub admin: Address,
    pub employee: Address,
}

/// Event: employee display name cleared.
#[contractevent]
#[derive(Clone, Debug)]
pub struct EmployeeNameRemoved {
    pub admin: Address,
    pub employee: Address,
}

/// Event: salary schedule created and funded.
#[contractevent]
#[derive(Clone, Debug)]
pub struct SalaryCreated {
    pub salary_id: u64,
    pub employer: Address,
    pub employee: Address,
    pub token: Address,
    pub total_deposited: i128,
    pub periods: u32,
}

/// Event: accrued salary withdrawn.
#[contractevent]
#[derive(Clone, Debug)]
pub struct SalaryWithdrawn {
    pub salary_id: u64,
    pub employee: Address,
    pub amount: i128,
    pub periods: u32,
}

/// Event: periods appended to a schedule.
#[contractevent]
#[derive(Clone, Debug)]
pub struct SalaryPeriodsAdded {
    pub salary_id: u64,
    pub periods: u32,
    pub deposited: i128,
}

/// Event: unaccrued tail periods removed from a schedule.
#[contractevent]
#[derive(Clone, Debug)]
pub struct SalaryPeriodsRemoved {
    pub salary_id: u64,
    pub periods: u32,
    pub refunded: i128,
}

/// Event: schedule destroyed, by explicit removal or exhaustion.
#[contractevent]
#[derive(Clone, Debug)]
pub struct SalaryRemoved {
    pub salary_id: u64,
    pub settled: i128,
    pub refunded: i128,
}

pub fn emit_employee_added(e: &Env, event: EmployeeAdded) {
    event.publish(e);
}

pub fn emit_employee_removed(e: &Env, event: EmployeeRemoved) {
    event.publish(e);
}

pub fn emit_employee_name_set(e: &Env, event: EmployeeNameSet) {
    event.publish(e);
}

pub fn emit_employee_name_removed(e: &Env, event: EmployeeNameRemoved) {
    event.publish(e);
}

pub fn emit_salary_created(e: &Env, event: SalaryCreated) {
    event.publish(e);
}

pub fn emit_salary_withdrawn(e: &Env, event: SalaryWithdrawn) {
    event.publish(e);
}

pub fn emit_salary_periods_added(e: &Env, event: SalaryPeriodsAdded) {
    event.publish(e);
}

pub fn emit_salary_periods_removed(e: &Env, event: SalaryPeriodsRemoved) {
    event.publish(e);
}

pub fn emit_salary_removed(e: &Env, event: SalaryRemoved) {
    event.publish(e);
}
