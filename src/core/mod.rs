
pub mod logging;

// Archives of Nethys lookup pipeline: query, search, extract, render
pub mod nethys;
