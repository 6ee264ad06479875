//! Fixed placeholder rows used to seed a fresh dashboard database.

use crate::model::InvoiceStatus;

pub struct SeedUser {
    pub id: &'static str,
    pub name: &'static str,
    pub email: &'static str,
    pub password: &'static str,
}

pub struct SeedCustomer {
    pub id: &'static str,
    pub name: &'static str,
    pub email: &'static str,
    pub image_url: &'static str,
}

pub struct SeedInvoice {
    pub customer_id: &'static str,
    pub amount: i64,
    pub status: InvoiceStatus,
    pub date: &'static str,
}

pub struct SeedRevenue {
    pub month: &'static str,
    pub revenue: i64,
}

const EVIL_RABBIT: &str = "d6e15727-9fe1-4961-8c5b-ea44a9bd81aa";
const DELBA: &str = "3958dc9e-712f-4377-85e9-fec4b6a6442a";
const LEE: &str = "3958dc9e-742f-4377-85e9-fec4b6a6442a";
const MICHAEL: &str = "76d65c26-f784-44a2-ac19-586678f7c2f2";
const AMY: &str = "cc27c14a-0acf-4f4a-a6c9-d45682c144b9";
const BALAZS: &str = "13d07535-c59e-4157-a011-f8d2ef4e0cbb";

pub const USERS: &[SeedUser] = &[SeedUser {
    id: "410544b2-4001-4271-9855-fec4b6a6442a",
    name: "User",
    email: "user@nextmail.com",
    password: "123456",
}];

pub const CUSTOMERS: &[SeedCustomer] = &[
    SeedCustomer {
        id: EVIL_RABBIT,
        name: "Evil Rabbit",
        email: "evil@rabbit.com",
        image_url: "/customers/evil-rabbit.png",
    },
    SeedCustomer {
        id: DELBA,
        name: "Delba de Oliveira",
        email: "delba@oliveira.com",
        image_url: "/customers/delba-de-oliveira.png",
    },
    SeedCustomer {
        id: LEE,
        name: "Lee Robinson",
        email: "lee@robinson.com",
        image_url: "/customers/lee-robinson.png",
    },
    SeedCustomer {
        id: MICHAEL,
        name: "Michael Novotny",
        email: "michael@novotny.com",
        image_url: "/customers/michael-novotny.png",
    },
    SeedCustomer {
        id: AMY,
        name: "Amy Burns",
        email: "amy@burns.com",
        image_url: "/customers/amy-burns.png",
    },
    SeedCustomer {
        id: BALAZS,
        name: "Balazs Orban",
        email: "balazs@orban.com",
        image_url: "/customers/balazs-orban.png",
    },
];

const fn invoice(
    customer_id: &'static str,
    amount: i64,
    status: InvoiceStatus,
    date: &'static str,
) -> SeedInvoice {
    SeedInvoice {
        customer_id,
        amount,
        status,
        date,
    }
}

pub const INVOICES: &[SeedInvoice] = &[
    invoice(EVIL_RABBIT, 15795, InvoiceStatus::Pending, "2022-12-06"),
    invoice(DELBA, 20348, InvoiceStatus::Pending, "2022-11-14"),
    invoice(AMY, 3040, InvoiceStatus::Paid, "2022-10-29"),
    invoice(MICHAEL, 44800, InvoiceStatus::Paid, "2023-09-10"),
    invoice(BALAZS, 34577, InvoiceStatus::Pending, "2023-08-05"),
    invoice(LEE, 54246, InvoiceStatus::Pending, "2023-07-16"),
    invoice(EVIL_RABBIT, 666, InvoiceStatus::Pending, "2023-06-27"),
    invoice(MICHAEL, 32545, InvoiceStatus::Paid, "2023-06-09"),
    invoice(AMY, 1250, InvoiceStatus::Paid, "2023-06-17"),
    invoice(BALAZS, 8546, InvoiceStatus::Paid, "2023-06-07"),
    invoice(DELBA, 500, InvoiceStatus::Paid, "2023-08-19"),
    invoice(BALAZS, 8945, InvoiceStatus::Paid, "2023-06-03"),
    invoice(LEE, 1000, InvoiceStatus::Paid, "2022-06-05"),
];

pub const REVENUE: &[SeedRevenue] = &[
    SeedRevenue { month: "Jan", revenue: 2000 },
    SeedRevenue { month: "Feb", revenue: 1800 },
    SeedRevenue { month: "Mar", revenue: 2200 },
    SeedRevenue { month: "Apr", revenue: 2500 },
    SeedRevenue { month: "May", revenue: 2300 },
    SeedRevenue { month: "Jun", revenue: 3200 },
    SeedRevenue { month: "Jul", revenue: 3500 },
    SeedRevenue { month: "Aug", revenue: 3700 },
    SeedRevenue { month: "Sep", revenue: 2500 },
    SeedRevenue { month: "Oct", revenue: 2800 },
    SeedRevenue { month: "Nov", revenue: 3000 },
    SeedRevenue { month: "Dec", revenue: 4800 },
];
