use soroban_sdk::{contracttype, Address, Env, String, Vec};

/// A salary agreement between one employer and one employee: a fixed period
/// length, a variable per-period amount sequence, and accrual bookkeeping.
///
/// `withdrawn_periods` counts periods settled in full; `fraction_paid` is
/// the amount already paid out of the in-progress period, so a repeated
/// withdrawal within one period pays only what newly accrued.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SalarySchedule {
    pub id: u64,
    pub employer: Address,
    pub employee: Address,
    pub token: Address,
    pub period_duration: u64,
    pub period_amounts: Vec<i128>,
    pub withdrawn_periods: u32,
    pub last_withdrawal_time: u64,
    pub fraction_paid: i128,
    pub total_deposited: i128,
}

/// Storage keys
#[contracttype]
#[derive(Clone)]
pub enum StorageKey {
    /// Credential contract consulted for employer rights.
    Credential,
    /// Subject asset the credential is checked against.
    Subject,
    /// Next schedule id; ids are never reused.
    NextSalaryId,
    /// Schedule by id.
    Salary(u64),
    /// Schedule id for an (employer, employee) pair; at most one.
    SalaryByPair(Address, Address),
    /// Schedule ids where the address is the employee.
    EmployeeSalaries(Address),
    /// Admins currently employing an address.
    EmployeeAdmins(Address),
    /// Employees of an admin.
    AdminEmployees(Address),
    /// Display name; persists independently of the relation.
    EmployeeName(Address),
}

pub fn read_credential(env: &Env) -> Address {
    env.storage()
        .persistent()
        .get(&StorageKey::Credential)
        .expect("Not initialized")
}

pub fn read_subject(env: &Env) -> Address {
    env.storage()
        .persistent()
        .get(&StorageKey::Subject)
        .expect("Not initialized")
}

pub fn next_salary_id(env: &Env) -> u64 {
    let current: u64 = env
        .storage()
        .persistent()
        .get(&StorageKey::NextSalaryId)
        .unwrap_or(0);
    let next = current.checked_add(1).expect("Salary id overflow");
    env.storage()
        .persistent()
        .set(&StorageKey::NextSalaryId, &next);
    next
}

pub fn read_salary(env: &Env, id: u64) -> Option<SalarySchedule> {
    env.storage().persistent().get(&StorageKey::Salary(id))
}

pub fn write_salary(env: &Env, schedule: &SalarySchedule) {
    env.storage()
        .persistent()
        .set(&StorageKey::Salary(schedule.id), schedule);
}

pub fn pair_salary(env: &Env, employer: &Address, employee: &Address) -> Option<u64> {
    env.storage()
        .persistent()
        .get(&StorageKey::SalaryByPair(employer.clone(), employee.clone()))
}

pub fn salary_ids_of(env: &Env, employee: &Address) -> Vec<u64> {
    env.storage()
        .persistent()
        .get(&StorageKey::EmployeeSalaries(employee.clone()))
        .unwrap_or(Vec::new(env))
}

/// Stores the schedule and wires up both lookup indices.
pub fn link_salary(env: &Env, schedule: &SalarySchedule) {
    write_salary(env, schedule);
    env.storage().persistent().set(
        &StorageKey::SalaryByPair(schedule.employer.clone(), schedule.employee.clone()),
        &schedule.id,
    );
    let mut ids = salary_ids_of(env, &schedule.employee);
    ids.push_back(schedule.id);
    env.storage()
        .persistent()
        .set(&StorageKey::EmployeeSalaries(schedule.employee.clone()), &ids);
}

/// Deletes the schedule and both lookup indices. The id is never reused.
pub fn unlink_salary(env: &Env, schedule: &SalarySchedule) {
    env.storage()
        .persistent()
        .remove(&StorageKey::Salary(schedule.id));
    env.storage().persistent().remove(&StorageKey::SalaryByPair(
        schedule.employer.clone(),
        schedule.employee.clone(),
    ));
    let ids = salary_ids_of(env, &schedule.employee);
    let mut remaining = Vec::new(env);
    for id in ids.iter() {
        if id != schedule.id {
            remaining.push_back(id);
        }
    }
    if remaining.is_empty() {
        env.storage()
            .persistent()
            .remove(&StorageKey::EmployeeSalaries(schedule.employee.clone()));
    } else {
        env.storage().persistent().set(
            &StorageKey::EmployeeSalaries(schedule.employee.clone()),
            &remaining,
        );
    }
}

pub fn admins_of(env: &Env, employee: &Address) -> Vec<Address> {
    env.storage()
        .persistent()
        .get(&StorageKey::EmployeeAdmins(employee.clone()))
        .unwrap_or(Vec::new(env))
}

pub fn employees_of(env: &Env, admin: &Address) -> Vec<Address> {
    env.storage()
        .persistent()
        .get(&StorageKey::AdminEmployees(admin.clone()))
        .unwrap_or(Vec::new(env))
}

pub fn has_relation(env: &Env, admin: &Address, employee: &Address) -> bool {
    for entry in admins_of(env, employee).iter() {
        if entry == *admin {
            return true;
        }
    }
    false
}

pub fn add_relation(env: &Env, admin: &Address, employee: &Address) {
    let mut admins = admins_of(env, employee);
    admins.push_back(admin.clone());
    env.storage()
        .persistent()
        .set(&StorageKey::EmployeeAdmins(employee.clone()), &admins);
    let mut employees = employees_of(env, admin);
    employees.push_back(employee.clone());
    env.storage()
        .persistent()
        .set(&StorageKey::AdminEmployees(admin.clone()), &employees);
}

/// Drops the relation from both sides. The employee record disappears with
/// its last admin; the name key is left alone.
pub fn remove_relation(env: &Env, admin: &Address, employee: &Address) {
    let admins = remove_address(env, admins_of(env, employee), admin);
    if admins.is_empty() {
        env.storage()
            .persistent()
            .remove(&StorageKey::EmployeeAdmins(employee.clone()));
    } else {
        env.storage()
            .persistent()
            .set(&StorageKey::EmployeeAdmins(employee.clone()), &admins);
    }
    let employees = remove_address(env, employees_of(env, admin), employee);
    if employees.is_empty() {
        env.storage()
            .persistent()
            .remove(&StorageKey::AdminEmployees(admin.clone()));
    } else {
        env.storage()
            .persistent()
            .set(&StorageKey::AdminEmployees(admin.clone()), &employees);
    }
}

pub fn read_name(env: &Env, employee: &Address) -> Option<String> {
    env.storage()
        .persistent()
        .get(&StorageKey::EmployeeName(employee.clone()))
}

pub fn write_name(env: &Env, employee: &Address, name: &String) {
    env.storage()
        .persistent()
        .set(&StorageKey::EmployeeName(employee.clone()), name);
}

pub fn remove_name(env: &Env, employee: &Address) {
    env.storage()
        .persistent()
        .remove(&StorageKey::EmployeeName(employee.clone()));
}

fn remove_address(env: &Env, list: Vec<Address>, target: &Address) -> Vec<Address> {
    let mut remaining = Vec::new(env);
    for entry in list.iter() {
        if entry != *target {
            remaining.push_back(entry);
        }
    }
    remaining
}
