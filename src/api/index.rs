// Landing page listing the available routes

use crate::routing::API_PREFIX;

pub fn index_page() -> String {
    format!(
        "Welcome to the Hawaii Climate API<br>\
         Available API Routes:<br>\
         {API_PREFIX}/precipitation<br>\
         {API_PREFIX}/stations<br>\
         {API_PREFIX}/tobs<br>\
         {API_PREFIX}/&lt;start&gt; (enter as YYYY-MM-DD)<br>\
         {API_PREFIX}/&lt;start&gt;/&lt;end&gt; (enter as YYYY-MM-DD/YYYY-MM-DD)<br>"
    )
}
