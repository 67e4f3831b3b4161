#![no_std]

//! Salary streaming engine.
//!
//! Employers — holders of an external admin credential — maintain
//! employment relations and per-period salary schedules. Funding is
//! pull-based: scheduling a salary pulls its full amount from the
//! employer's allowance up front, and the employee withdraws whatever has
//! accrued, whole periods plus a proportional share of the period in
//! progress. The relation is many-to-many: an employee can be employed by
//! several admins at once, with at most one schedule per employer/employee
//! pair.
//!
//! Every withdrawal commits its bookkeeping before the outbound transfer,
//! so a reentrant call observes fully settled state.

pub mod accrual;
mod error;
mod events;
mod interfaces;
mod storage;

pub use error::SalaryError;
pub use interfaces::{Credential, CredentialClient};
pub use storage::{SalarySchedule, StorageKey};

use accrual::Accrual;
use events::{
    EmployeeAdded, EmployeeNameRemoved, EmployeeNameSet, EmployeeRemoved, SalaryCreated,
    SalaryPeriodsAdded, SalaryPeriodsRemoved, SalaryRemoved, SalaryWithdrawn,
};
use soroban_sdk::{contract, contractimpl, token, Address, Env, String, Vec};

/// Minimum number of periods a new schedule must carry.
pub const MIN_SALARY_PERIODS: u32 = 2;

#[contract]
pub struct SalaryStreamContract;

#[contractimpl]
impl SalaryStreamContract {
    /// Initializes the engine with the credential contract and the subject
    /// asset whose credential holders act as employers here.
    pub fn initialize(env: Env, credential: Address, subject: Address) {
        if env.storage().persistent().has(&StorageKey::Credential) {
            panic!("Already initialized");
        }
        env.storage()
            .persistent()
            .set(&StorageKey::Credential, &credential);
        env.storage().persistent().set(&StorageKey::Subject, &subject);
    }

    // ------------------------------------------------------------------
    // Employee relations
    // ------------------------------------------------------------------

    /// Creates the employment relation between the calling admin and
    /// `employee`.
    pub fn add_employee(env: Env, admin: Address, employee: Address) -> Result<(), SalaryError> {
        admin.require_auth();
        require_admin(&env, &admin)?;
        if storage::has_relation(&env, &admin, &employee) {
            return Err(SalaryError::AlreadyEmployee);
        }
        storage::add_relation(&env, &admin, &employee);
        events::emit_employee_added(&env, EmployeeAdded { admin, employee });
        Ok(())
    }

    /// Removes the calling admin's relation with `employee`, force-settling
    /// the schedule between them first: accrued pay goes to the employee,
    /// the unaccrued remainder back to the admin. Relations and schedules
    /// owned by other admins are untouched.
    pub fn remove_employee(env: Env, admin: Address, employee: Address) -> Result<(), SalaryError> {
        admin.require_auth();
        require_admin(&env, &admin)?;
        if !storage::has_relation(&env, &admin, &employee) {
            return Err(SalaryError::AlreadyNotAnEmployee);
        }
        let pair = storage::pair_salary(&env, &admin, &employee);
        storage::remove_relation(&env, &admin, &employee);
        if let Some(id) = pair {
            if let Some(schedule) = storage::read_salary(&env, id) {
                settle_and_destroy(&env, schedule);
            }
        }
        events::emit_employee_removed(&env, EmployeeRemoved { admin, employee });
        Ok(())
    }

    /// Sets the employee's display name. Restricted to an admin currently
    /// employing them.
    pub fn set_employee_name(
        env: Env,
        admin: Address,
        employee: Address,
        name: String,
    ) -> Result<(), SalaryError> {
        admin.require_auth();
        require_admin(&env, &admin)?;
        if !storage::has_relation(&env, &admin, &employee) {
            return Err(SalaryError::NotAllowedToSetName);
        }
        if name.len() == 0 {
            return Err(SalaryError::EmptyName);
        }
        storage::write_name(&env, &employee, &name);
        events::emit_employee_name_set(&env, EmployeeNameSet { admin, employee });
        Ok(())
    }

    /// Clears the employee's display name.
    pub fn remove_employee_name(
        env: Env,
        admin: Address,
        employee: Address,
    ) -> Result<(), SalaryError> {
        admin.require_auth();
        require_admin(&env, &admin)?;
        if !storage::has_relation(&env, &admin, &employee) {
            return Err(SalaryError::NotAllowedToRemoveName);
        }
        storage::remove_name(&env, &employee);
        events::emit_employee_name_removed(&env, EmployeeNameRemoved { admin, employee });
        Ok(())
    }

    // ------------------------------------------------------------------
    // Schedules
    // ------------------------------------------------------------------

    /// Schedules a salary for `employee`: one entry of `period_amounts`
    /// accrues per `period_duration` seconds, starting now. Pulls the full
    /// sum from the calling admin's allowance of `token`.
    ///
    /// Returns the new schedule id.
    pub fn add_salary(
        env: Env,
        admin: Address,
        employee: Address,
        token: Address,
        period_duration: u64,
        period_amounts: Vec<i128>,
    ) -> Result<u64, SalaryError> {
        admin.require_auth();
        require_admin(&env, &admin)?;
        if !storage::has_relation(&env, &admin, &employee) {
            return Err(SalaryError::NotAdminForEmployee);
        }
        if storage::pair_salary(&env, &admin, &employee).is_some() {
            return Err(SalaryError::SalaryAlreadyExists);
        }
        if period_duration == 0 {
            return Err(SalaryError::InvalidPeriodDuration);
        }
        if period_amounts.len() < MIN_SALARY_PERIODS {
            return Err(SalaryError::InvalidAmountOfPeriods);
        }
        let total = sum_amounts(&period_amounts)?;
        pull_deposit(&env, &token, &admin, total)?;

        let id = storage::next_salary_id(&env);
        let periods = period_amounts.len();
        let schedule = SalarySchedule {
            id,
            employer: admin.clone(),
            employee: employee.clone(),
            token: token.clone(),
            period_duration,
            period_amounts,
            withdrawn_periods: 0,
            last_withdrawal_time: env.ledger().timestamp(),
            fraction_paid: 0,
            total_deposited: total,
        };
        storage::link_salary(&env, &schedule);
        events::emit_salary_created(
            &env,
            SalaryCreated {
                salary_id: id,
                employer: admin,
                employee,
                token,
                total_deposited: total,
                periods,
            },
        );
        Ok(id)
    }

    /// Withdraws everything accrued on the schedule: whole elapsed periods
    /// plus the proportional share of the period in progress, net of what
    /// that period already paid. Destroys the schedule once the final
    /// period is withdrawn in full.
    ///
    /// Returns the amount paid; zero when nothing new has accrued.
    pub fn withdraw_salary(env: Env, employee: Address, id: u64) -> Result<i128, SalaryError> {
        employee.require_auth();
        let schedule = storage::read_salary(&env, id).ok_or(SalaryError::SalaryNotFound)?;
        if schedule.employee != employee {
            return Err(SalaryError::NotEmployeeForThisSalary);
        }
        let (paid, _) = settle_withdrawal(&env, schedule, false);
        Ok(paid)
    }

    /// Withdraws every schedule where the caller is the employee. A failed
    /// transfer on one schedule rolls that schedule back and does not block
    /// the others.
    ///
    /// Returns the total paid.
    pub fn withdraw_all_salaries(env: Env, employee: Address) -> Result<i128, SalaryError> {
        employee.require_auth();
        let ids = storage::salary_ids_of(&env, &employee);
        let mut total = 0i128;
        for id in ids.iter() {
            if let Some(schedule) = storage::read_salary(&env, id) {
                let (paid, _) = settle_withdrawal(&env, schedule, true);
                total += paid;
            }
        }
        Ok(total)
    }

    /// Appends periods to the schedule's tail, pulling their sum from the
    /// calling admin's allowance.
    pub fn add_periods_to_salary(
        env: Env,
        admin: Address,
        id: u64,
        amounts: Vec<i128>,
    ) -> Result<(), SalaryError> {
        admin.require_auth();
        let mut schedule = require_schedule_admin(&env, &admin, id)?;
        if amounts.is_empty() {
            return Err(SalaryError::InvalidAmountOfPeriods);
        }
        let added = sum_amounts(&amounts)?;
        pull_deposit(&env, &schedule.token, &admin, added)?;
        for amount in amounts.iter() {
            schedule.period_amounts.push_back(amount);
        }
        schedule.total_deposited = schedule
            .total_deposited
            .checked_add(added)
            .expect("Amount overflow");
        storage::write_salary(&env, &schedule);
        events::emit_salary_periods_added(
            &env,
            SalaryPeriodsAdded {
                salary_id: id,
                periods: amounts.len(),
                deposited: added,
            },
        );
        Ok(())
    }

    /// Removes `count` periods from the schedule's tail and refunds their
    /// sum to the calling admin. Only periods that have not begun accruing
    /// can be removed; the period in progress is protected.
    pub fn remove_periods_from_salary(
        env: Env,
        admin: Address,
        id: u64,
        count: u32,
    ) -> Result<(), SalaryError> {
        admin.require_auth();
        let mut schedule = require_schedule_admin(&env, &admin, id)?;
        if count == 0 {
            return Err(SalaryError::InvalidAmountOfPeriods);
        }

        let elapsed = env.ledger().timestamp() - schedule.last_withdrawal_time;
        let full = elapsed / schedule.period_duration;
        // Fully elapsed periods are owed to the employee, and the period
        // currently accruing is never removable either.
        let protected = schedule.withdrawn_periods + full as u32 + 1;
        let removable = schedule.period_amounts.len() - protected;
        if count > removable {
            return Err(SalaryError::PeriodsAlreadyAccrued);
        }

        let mut refund = 0i128;
        for _ in 0..count {
            refund += schedule
                .period_amounts
                .pop_back()
                .expect("Period underflow");
        }
        schedule.total_deposited -= refund;
        storage::write_salary(&env, &schedule);

        token::Client::new(&env, &schedule.token).transfer(
            &env.current_contract_address(),
            &schedule.employer,
            &refund,
        );
        events::emit_salary_periods_removed(
            &env,
            SalaryPeriodsRemoved {
                salary_id: id,
                periods: count,
                refunded: refund,
            },
        );
        Ok(())
    }

    /// Destroys the schedule: accrued pay is force-settled to the employee
    /// and the unaccrued remainder refunded to the calling admin.
    pub fn remove_salary(env: Env, admin: Address, id: u64) -> Result<(), SalaryError> {
        admin.require_auth();
        let schedule = require_owned_schedule(&env, &admin, id)?;
        settle_and_destroy(&env, schedule);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Views
    // ------------------------------------------------------------------

    /// Amount a withdrawal would pay right now.
    pub fn accrued_amount(env: Env, id: u64) -> Result<i128, SalaryError> {
        let schedule = storage::read_salary(&env, id).ok_or(SalaryError::SalaryNotFound)?;
        Ok(evaluate_now(&env, &schedule).payable)
    }

    pub fn get_salary(env: Env, id: u64) -> Option<SalarySchedule> {
        storage::read_salary(&env, id)
    }

    pub fn get_employee_salaries(env: Env, employee: Address) -> Vec<u64> {
        storage::salary_ids_of(&env, &employee)
    }

    pub fn is_employee(env: Env, admin: Address, employee: Address) -> bool {
        storage::has_relation(&env, &admin, &employee)
    }

    pub fn get_employee_admins(env: Env, employee: Address) -> Vec<Address> {
        storage::admins_of(&env, &employee)
    }

    pub fn get_admin_employees(env: Env, admin: Address) -> Vec<Address> {
        storage::employees_of(&env, &admin)
    }

    pub fn get_employee_name(env: Env, employee: Address) -> Option<String> {
        storage::read_name(&env, &employee)
    }
}

// ----------------------------------------------------------------------
// Helpers
// ----------------------------------------------------------------------

fn require_admin(env: &Env, caller: &Address) -> Result<(), SalaryError> {
    let credential = storage::read_credential(env);
    let subject = storage::read_subject(env);
    if CredentialClient::new(env, &credential).holds_credential_for(caller, &subject) {
        Ok(())
    } else {
        Err(SalaryError::NotAuthorized)
    }
}

/// Full authorization chain for schedule edits: credential, relation with
/// the schedule's employee, ownership of this particular schedule, and the
/// schedule not yet run out.
fn require_schedule_admin(
    env: &Env,
    admin: &Address,
    id: u64,
) -> Result<SalarySchedule, SalaryError> {
    let schedule = require_owned_schedule(env, admin, id)?;
    let elapsed = env.ledger().timestamp() - schedule.last_withdrawal_time;
    if accrual::is_ended(
        schedule.period_amounts.len(),
        schedule.withdrawn_periods,
        elapsed,
        schedule.period_duration,
    ) {
        return Err(SalaryError::SalaryEnded);
    }
    Ok(schedule)
}

fn require_owned_schedule(
    env: &Env,
    admin: &Address,
    id: u64,
) -> Result<SalarySchedule, SalaryError> {
    require_admin(env, admin)?;
    let schedule = storage::read_salary(env, id).ok_or(SalaryError::SalaryNotFound)?;
    if !storage::has_relation(env, admin, &schedule.employee) {
        return Err(SalaryError::NotAdminForEmployee);
    }
    if schedule.employer != *admin {
        return Err(SalaryError::NotAdminForThisSalary);
    }
    Ok(schedule)
}

fn sum_amounts(amounts: &Vec<i128>) -> Result<i128, SalaryError> {
    let mut total = 0i128;
    for amount in amounts.iter() {
        if amount < 1 {
            return Err(SalaryError::InvalidPeriodAmount);
        }
        total = total.checked_add(amount).expect("Amount overflow");
    }
    Ok(total)
}

/// Pulls `amount` of `token` from the employer into the engine. Allowance
/// and balance are both checked up front so the failure is a clean error
/// rather than a trapped transfer.
fn pull_deposit(env: &Env, token: &Address, employer: &Address, amount: i128) -> Result<(), SalaryError> {
    let client = token::Client::new(env, token);
    let this = env.current_contract_address();
    if client.allowance(employer, &this) < amount || client.balance(employer) < amount {
        return Err(SalaryError::NotEnoughTokensAllowed);
    }
    client.transfer_from(&this, employer, &this, &amount);
    Ok(())
}

fn evaluate_now(env: &Env, schedule: &SalarySchedule) -> Accrual {
    let elapsed = env.ledger().timestamp() - schedule.last_withdrawal_time;
    accrual::evaluate(
        &schedule.period_amounts,
        schedule.withdrawn_periods,
        schedule.fraction_paid,
        elapsed,
        schedule.period_duration,
    )
}

/// Commits the withdrawal bookkeeping, then transfers. With `tolerant` the
/// transfer failure rolls this schedule back instead of failing the call.
///
/// Returns the amount paid and whether the schedule was destroyed.
fn settle_withdrawal(env: &Env, schedule: SalarySchedule, tolerant: bool) -> (i128, bool) {
    let previous = schedule.clone();
    let mut schedule = schedule;
    let acc = evaluate_now(env, &schedule);

    schedule.withdrawn_periods += acc.periods;
    schedule.last_withdrawal_time += u64::from(acc.periods) * schedule.period_duration;
    schedule.fraction_paid = acc.fraction;

    let finished = schedule.withdrawn_periods == schedule.period_amounts.len();
    if finished {
        storage::unlink_salary(env, &schedule);
    } else {
        storage::write_salary(env, &schedule);
    }

    if acc.payable > 0 {
        let client = token::Client::new(env, &schedule.token);
        let this = env.current_contract_address();
        if tolerant {
            if client
                .try_transfer(&this, &schedule.employee, &acc.payable)
                .is_err()
            {
                // Roll this schedule back; the caller continues with the rest.
                if finished {
                    storage::link_salary(env, &previous);
                } else {
                    storage::write_salary(env, &previous);
                }
                return (0, false);
            }
        } else {
            client.transfer(&this, &schedule.employee, &acc.payable);
        }
    }

    events::emit_salary_withdrawn(
        env,
        SalaryWithdrawn {
            salary_id: schedule.id,
            employee: schedule.employee.clone(),
            amount: acc.payable,
            periods: acc.periods,
        },
    );
    if finished {
        events::emit_salary_removed(
            env,
            SalaryRemoved {
                salary_id: schedule.id,
                settled: acc.payable,
                refunded: 0,
            },
        );
    }
    (acc.payable, finished)
}

/// Force-settles accrued pay to the employee, refunds the unaccrued
/// remainder to the employer, and destroys the schedule.
fn settle_and_destroy(env: &Env, schedule: SalarySchedule) -> (i128, i128) {
    let acc = evaluate_now(env, &schedule);

    let mut outstanding = 0i128;
    for i in schedule.withdrawn_periods..schedule.period_amounts.len() {
        outstanding = outstanding
            .checked_add(schedule.period_amounts.get_unchecked(i))
            .expect("Amount overflow");
    }
    let refund = outstanding - schedule.fraction_paid - acc.payable;

    storage::unlink_salary(env, &schedule);

    let client = token::Client::new(env, &schedule.token);
    let this = env.current_contract_address();
    if acc.payable > 0 {
        client.transfer(&this, &schedule.employee, &acc.payable);
    }
    if refund > 0 {
        client.transfer(&this, &schedule.employer, &refund);
    }
    events::emit_salary_removed(
        env,
        SalaryRemoved {
            salary_id: schedule.id,
            settled: acc.payable,
            refunded: refund,
        },
    );
    (acc.payable, refund)
}
